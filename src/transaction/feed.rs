//! The "recent transactions" feed: transactions grouped by day, styled for
//! display and shown through a growing window, plus the endpoints that ingest
//! and serve them.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    AppState, Error,
    category::{CategoryIcon, classify},
    format::{format_date_heading, format_display_amount},
    pagination::{PaginationConfig, window},
};

use super::{
    core::{Transaction, TransactionDate, normalize_transactions},
    db::{append_transactions, get_transactions},
    grouping::{DayGroup, group_by_date},
};

/// A transaction as shown in the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedRow {
    /// The transaction name.
    pub name: String,
    /// The transaction category.
    pub category: String,
    /// The signed amount, negative for income.
    pub amount: f64,
    /// The amount as shown to the user, e.g. "+$45.00" for income.
    pub display_amount: String,
    /// Whether money came in.
    pub is_income: bool,
    /// The category icon.
    pub icon: CategoryIcon,
    /// The category color as a CSS hex string.
    pub color: &'static str,
}

impl From<&Transaction> for FeedRow {
    fn from(transaction: &Transaction) -> Self {
        let style = classify(&transaction.category);

        Self {
            name: transaction.name.clone(),
            category: transaction.category.clone(),
            amount: transaction.amount,
            display_amount: format_display_amount(transaction.amount),
            is_income: transaction.is_income(),
            icon: style.icon,
            color: style.color,
        }
    }
}

/// One day of the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedDay {
    /// The day, or the unknown-date bucket.
    pub date: TransactionDate,
    /// The heading shown above the day, e.g. "Tuesday, January 2".
    pub heading: String,
    /// The day's transactions in the order they were stored.
    pub transactions: Vec<FeedRow>,
}

impl From<&DayGroup> for FeedDay {
    fn from(group: &DayGroup) -> Self {
        Self {
            date: group.date,
            heading: format_date_heading(group.date),
            transactions: group.transactions.iter().map(FeedRow::from).collect(),
        }
    }
}

/// The visible part of the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionFeed {
    /// The most recent days, newest first.
    pub days: Vec<FeedDay>,
    /// Whether there are older days past the window.
    pub has_more: bool,
    /// The window to request to show more days.
    pub next_window: Option<usize>,
}

/// Build the feed for the first `window_size` days of `transactions`.
pub fn build_feed(
    transactions: &[Transaction],
    window_size: usize,
    config: &PaginationConfig,
) -> TransactionFeed {
    let groups = group_by_date(transactions);
    let visible = window(&groups, window_size, config);

    TransactionFeed {
        days: visible.items.iter().map(FeedDay::from).collect(),
        has_more: visible.has_more,
        next_window: visible.next_window,
    }
}

/// The state needed by the transaction endpoints.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how much of the feed to show.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config,
        }
    }
}

/// Selects whose data a request is about. Without a user every stored
/// transaction is used.
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    /// The owner of the transactions.
    pub user_id: Option<String>,
}

/// The query string for the transaction feed.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    /// The owner of the transactions.
    pub user_id: Option<String>,
    /// How many days to show. Defaults to [PaginationConfig::default_window].
    pub window: Option<usize>,
}

/// Normalize and store a batch of aggregator transactions.
///
/// The body may be the aggregator's transaction array or a response object
/// with a `transactions` field. Responds with the normalized transactions.
pub async fn ingest_transactions_endpoint(
    State(state): State<TransactionState>,
    Query(query): Query<UserQuery>,
    Json(body): Json<Value>,
) -> Result<Response, Error> {
    let records = body.get("transactions").unwrap_or(&body);
    let transactions = normalize_transactions(records);

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::LockError)?;

    append_transactions(&transactions, query.user_id.as_deref(), &connection)
        .inspect_err(|error| tracing::error!("could not store transactions: {error}"))?;

    tracing::info!("stored {} transactions", transactions.len());

    Ok((StatusCode::CREATED, Json(transactions)).into_response())
}

/// Get the recent transactions feed.
pub async fn get_transaction_feed(
    State(state): State<TransactionState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<TransactionFeed>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::LockError)?;

    let transactions = get_transactions(query.user_id.as_deref(), &connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    let window_size = query
        .window
        .unwrap_or(state.pagination_config.default_window);

    Ok(Json(build_feed(
        &transactions,
        window_size,
        &state.pagination_config,
    )))
}


#[cfg(test)]
mod endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{db::initialize, pagination::PaginationConfig, transaction::get_transactions};

    use super::{
        FeedQuery, TransactionState, UserQuery, get_transaction_feed,
        ingest_transactions_endpoint,
    };

    fn get_test_state() -> TransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        TransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
            pagination_config: PaginationConfig::default(),
        }
    }

    #[tokio::test]
    async fn ingest_normalizes_and_stores() {
        let state = get_test_state();
        let body = json!([
            {"name": "Coffee", "amount": "4.5", "category": ["Food and Drink", "Coffee Shop"], "date": "2024-01-02"},
            {"amount": -100},
            "junk",
        ]);

        let response = ingest_transactions_endpoint(
            State(state.clone()),
            Query(UserQuery {
                user_id: Some("me@example.com".to_owned()),
            }),
            Json(body),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let connection = state.db_connection.lock().unwrap();
        let stored = get_transactions(Some("me@example.com"), &connection).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].category, "Food and Drink");
        assert_eq!(stored[0].amount, 4.5);
        assert_eq!(stored[1].name, "Unknown Transaction");
    }

    #[tokio::test]
    async fn ingest_accepts_a_response_envelope() {
        let state = get_test_state();
        let body = json!({"transactions": [{"name": "Rent", "amount": 1200, "date": "2024-01-01"}]});

        ingest_transactions_endpoint(State(state.clone()), Query(UserQuery::default()), Json(body))
            .await
            .unwrap();

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_transactions(None, &connection).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn feed_uses_the_requested_window() {
        let state = get_test_state();
        let body = json!([
            {"name": "a", "amount": 1, "date": "2024-01-01"},
            {"name": "b", "amount": 1, "date": "2024-01-02"},
            {"name": "c", "amount": 1, "date": "2024-01-03"},
        ]);
        ingest_transactions_endpoint(State(state.clone()), Query(UserQuery::default()), Json(body))
            .await
            .unwrap();

        let Json(feed) = get_transaction_feed(
            State(state),
            Query(FeedQuery {
                user_id: None,
                window: Some(2),
            }),
        )
        .await
        .unwrap();

        assert_eq!(feed.days.len(), 2);
        assert_eq!(feed.days[0].transactions[0].name, "c");
        assert!(feed.has_more);
        assert_eq!(feed.next_window, Some(7));
    }
}
