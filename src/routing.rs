//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState, Error,
    account::{get_accounts_endpoint, replace_accounts_endpoint},
    dashboard::{get_insights_endpoint, get_summary_endpoint, get_top_categories_endpoint},
    endpoints,
    goal::{edit_goals_endpoint, get_goals_endpoint, reset_goals_endpoint},
    transaction::{get_transaction_feed, ingest_transactions_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(get_transaction_feed).post(ingest_transactions_endpoint),
        )
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .route(endpoints::TOP_CATEGORIES, get(get_top_categories_endpoint))
        .route(
            endpoints::ACCOUNTS,
            get(get_accounts_endpoint).put(replace_accounts_endpoint),
        )
        .route(endpoints::INSIGHTS, get(get_insights_endpoint))
        .route(
            endpoints::GOALS,
            get(get_goals_endpoint)
                .put(edit_goals_endpoint)
                .delete(reset_goals_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}
