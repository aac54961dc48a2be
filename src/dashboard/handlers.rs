//! Dashboard HTTP handlers.
//!
//! These are thin adapters: they load transactions, goals and accounts, then
//! hand them to the pure calculations in [crate::transaction],
//! [crate::category] and [super::insights].

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    account::AccountSnapshot,
    category::{CategoryTotal, top_categories},
    goal::get_goal_config,
    timezone::current_local_date,
    transaction::{FinancialSummary, Transaction, UserQuery, get_transactions, summarize},
};

use super::insights::{Insights, compute_insights, in_current_month};

/// The number of categories returned when the client does not ask for a number.
pub const DEFAULT_TOP_CATEGORIES: usize = 5;

/// The state needed for the dashboard endpoints.
///
/// Contains the database connection, timezone information and the latest
/// accounts required by dashboard handlers.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions and goals.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The latest accounts from the aggregator.
    pub accounts: AccountSnapshot,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            accounts: state.accounts.clone(),
        }
    }
}

/// The query string for the top categories endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TopCategoriesQuery {
    /// The owner of the transactions.
    pub user_id: Option<String>,
    /// How many categories to return.
    pub n: Option<usize>,
}

/// Get the balance, income and expenses over all of the user's transactions.
pub async fn get_summary_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<FinancialSummary>, Error> {
    let transactions = load_transactions(&state, query.user_id.as_deref())?;

    Ok(Json(summarize(&transactions)))
}

/// Get the categories with the most spending this month.
pub async fn get_top_categories_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<TopCategoriesQuery>,
) -> Result<Json<Vec<CategoryTotal>>, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let transactions = load_transactions(&state, query.user_id.as_deref())?;
    let this_month = in_current_month(&transactions, today);

    Ok(Json(top_categories(
        &this_month,
        query.n.unwrap_or(DEFAULT_TOP_CATEGORIES),
    )))
}

/// Get budget and savings progress.
///
/// `user_id` only selects whose transactions count towards this month's
/// spending. The goals and the account snapshot are shared by every user
/// of the server, so two users see the same goals and savings balance.
pub async fn get_insights_endpoint(
    State(state): State<DashboardState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Insights>, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let accounts = state.accounts.get()?;

    let (transactions, goals) = {
        let connection = lock_connection(&state)?;
        let transactions = get_transactions(query.user_id.as_deref(), &connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
        let goals = get_goal_config(&connection)
            .inspect_err(|error| tracing::error!("could not get goal config: {error}"))?;
        (transactions, goals)
    };

    Ok(Json(compute_insights(
        &accounts,
        &transactions,
        &goals,
        today,
    )))
}

fn load_transactions(
    state: &DashboardState,
    user_id: Option<&str>,
) -> Result<Vec<Transaction>, Error> {
    let connection = lock_connection(state)?;

    get_transactions(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))
}

fn lock_connection(state: &DashboardState) -> Result<MutexGuard<'_, Connection>, Error> {
    state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::LockError)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        extract::{Query, State},
    };
    use rusqlite::Connection;
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        account::{Account, AccountSnapshot},
        db::initialize,
        goal::{GoalAmount, GoalConfig, save_goal_config},
        transaction::{Transaction, UserQuery, append_transactions},
    };

    use super::{
        DashboardState, TopCategoriesQuery, get_insights_endpoint, get_summary_endpoint,
        get_top_categories_endpoint,
    };

    fn get_test_state(transactions: &[Transaction]) -> DashboardState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        append_transactions(transactions, None, &conn).unwrap();

        DashboardState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
            accounts: AccountSnapshot::default(),
        }
    }

    #[tokio::test]
    async fn summary_covers_all_transactions() {
        let today = OffsetDateTime::now_utc().date();
        let state = get_test_state(&[
            Transaction::build(-100.0, today, "pay"),
            Transaction::build(40.0, today - Duration::days(90), "old expense"),
        ]);

        let Json(got) = get_summary_endpoint(State(state), Query(UserQuery::default()))
            .await
            .unwrap();

        assert_eq!(got.income(), 100.0);
        assert_eq!(got.expenses(), 40.0);
        assert_eq!(got.balance(), 60.0);
    }

    #[tokio::test]
    async fn summary_filters_by_user() {
        let today = OffsetDateTime::now_utc().date();
        let state = get_test_state(&[
            Transaction::build(10.0, today, "mine").user_id(Some("me")),
            Transaction::build(99.0, today, "theirs").user_id(Some("them")),
        ]);

        let Json(got) = get_summary_endpoint(
            State(state),
            Query(UserQuery {
                user_id: Some("me".to_owned()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(got.expenses(), 10.0);
    }

    #[tokio::test]
    async fn top_categories_only_use_this_month() {
        let today = OffsetDateTime::now_utc().date();
        let state = get_test_state(&[
            Transaction::build(50.0, today, "a").category("Food"),
            Transaction::build(30.0, today, "b").category("Travel"),
            Transaction::build(20.0, today, "c").category("Shops"),
            Transaction::build(500.0, today - Duration::days(400), "d").category("Rent"),
        ]);

        let Json(got) = get_top_categories_endpoint(
            State(state),
            Query(TopCategoriesQuery {
                user_id: None,
                n: Some(2),
            }),
        )
        .await
        .unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].name, "Food");
        assert_eq!(got[0].percentage, 50);
        assert_eq!(got[1].name, "Travel");
    }

    #[tokio::test]
    async fn insights_combine_accounts_transactions_and_goals() {
        let today = OffsetDateTime::now_utc().date();
        let state = get_test_state(&[Transaction::build(300.0, today, "groceries")]);
        state
            .accounts
            .replace(vec![Account {
                id: "sav".to_owned(),
                name: "Plaid Saving".to_owned(),
                account_type: Some("depository".to_owned()),
                subtype: Some("savings".to_owned()),
                balance: Some(2500.0),
                currency: Some("USD".to_owned()),
            }])
            .unwrap();
        save_goal_config(
            &GoalConfig {
                monthly_budget: Some(GoalAmount::new(1200.0).unwrap()),
                savings_goal: None,
            },
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let Json(got) = get_insights_endpoint(State(state), Query(UserQuery::default()))
            .await
            .unwrap();

        assert_eq!(got.current_month_expenses, 300.0);
        assert_eq!(got.budget.total, 1200.0);
        assert_eq!(got.budget.percentage, 25);
        assert!(got.budget.is_custom);
        let savings = got.savings.unwrap();
        assert_eq!(savings.current, 2500.0);
        assert_eq!(savings.total, 10000.0);
        assert!(!savings.is_custom);
    }

    #[tokio::test]
    async fn goals_and_accounts_are_shared_between_users() {
        let today = OffsetDateTime::now_utc().date();
        let state = get_test_state(&[
            Transaction::build(100.0, today, "mine").user_id(Some("me")),
            Transaction::build(400.0, today, "theirs").user_id(Some("them")),
        ]);
        state
            .accounts
            .replace(vec![Account {
                id: "sav".to_owned(),
                name: "Joint Saving".to_owned(),
                account_type: Some("depository".to_owned()),
                subtype: Some("savings".to_owned()),
                balance: Some(1000.0),
                currency: Some("USD".to_owned()),
            }])
            .unwrap();
        save_goal_config(
            &GoalConfig {
                monthly_budget: Some(GoalAmount::new(1000.0).unwrap()),
                savings_goal: None,
            },
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let insights_for = |user_id: &str| {
            get_insights_endpoint(
                State(state.clone()),
                Query(UserQuery {
                    user_id: Some(user_id.to_owned()),
                }),
            )
        };
        let Json(mine) = insights_for("me").await.unwrap();
        let Json(theirs) = insights_for("them").await.unwrap();

        assert_eq!(mine.current_month_expenses, 100.0);
        assert_eq!(theirs.current_month_expenses, 400.0);
        assert_eq!(mine.budget.total, theirs.budget.total);
        assert_eq!(mine.current_savings, 1000.0);
        assert_eq!(theirs.current_savings, 1000.0);
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let mut state = get_test_state(&[]);
        state.local_timezone = "Not/AZone".to_owned();

        let result = get_insights_endpoint(State(state), Query(UserQuery::default())).await;

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezone("Not/AZone".to_owned()))
        );
    }
}
