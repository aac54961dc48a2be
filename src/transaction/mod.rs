//! Transactions pulled from linked bank accounts.
//!
//! This module contains everything related to transactions:
//! - The canonical `Transaction` model and the normalizer that builds it from
//!   aggregator records
//! - Summaries of income, expenses and balance
//! - Grouping by day and the "recent transactions" feed
//! - The append-only SQLite store and the endpoints for ingesting and reading

pub(crate) mod core;
mod db;
mod feed;
mod grouping;
mod summary;

pub use core::{
    DEFAULT_CATEGORY, Transaction, TransactionDate, UNKNOWN_DATE_LABEL,
    UNKNOWN_TRANSACTION_NAME, normalize_transactions,
};
pub use db::{append_transactions, create_transaction_table, get_transactions};
pub use feed::{
    FeedDay, FeedRow, TransactionFeed, UserQuery, build_feed, get_transaction_feed,
    ingest_transactions_endpoint,
};
pub use grouping::{DayGroup, group_by_date};
pub use summary::{FinancialSummary, summarize};

pub(crate) use summary::{format_cents, to_cents};
