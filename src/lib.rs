//! MoneyMojo is a personal finance dashboard for bank data pulled from an
//! account aggregator.
//!
//! This library turns loosely shaped aggregator records into canonical
//! transactions and accounts, and derives the dashboard's figures from them:
//! the balance, income and expense summary, the recent transactions feed, the
//! top spending categories and budget and savings progress. The figures are
//! served as JSON by a REST API.
//!
//! Amounts follow the aggregator's sign convention: negative amounts are
//! income and positive amounts are expenses.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod account;
mod app_state;
mod category;
mod dashboard;
mod db;
mod endpoints;
mod error;
mod format;
mod goal;
mod logging;
mod pagination;
mod routing;
mod timezone;
mod transaction;

pub use account::{Account, AccountSnapshot, UNKNOWN_ACCOUNT_NAME, normalize_accounts};
pub use app_state::AppState;
pub use category::{
    CATEGORY_RULES, CategoryIcon, CategoryKind, CategoryRule, CategoryStyle, CategoryTotal,
    DEFAULT_STYLE, classify, top_categories,
};
pub use dashboard::{
    GoalProgress, Insights, MIN_DEFAULT_MONTHLY_BUDGET, MIN_DEFAULT_SAVINGS_GOAL,
    compute_insights, default_monthly_budget, default_savings_goal,
};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use format::{format_currency, format_date_heading, format_display_amount};
pub use goal::{GoalAmount, GoalConfig, GoalEdit, get_goal_config, save_goal_config};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::{PaginationConfig, Window, window};
pub use routing::build_router;
pub use timezone::{current_local_date, get_local_offset};
pub use transaction::{
    DEFAULT_CATEGORY, DayGroup, FeedDay, FeedRow, FinancialSummary, Transaction, TransactionDate,
    TransactionFeed, UNKNOWN_DATE_LABEL, UNKNOWN_TRANSACTION_NAME, append_transactions,
    build_feed, get_transactions, group_by_date, normalize_transactions, summarize,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
