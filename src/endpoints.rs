//! The API endpoints URIs.

/// The route to ingest and read transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for the balance, income and expense totals.
pub const SUMMARY: &str = "/api/summary";
/// The route for the categories with the most spending this month.
pub const TOP_CATEGORIES: &str = "/api/categories/top";
/// The route to read and replace the account snapshot.
pub const ACCOUNTS: &str = "/api/accounts";
/// The route for budget and savings progress.
pub const INSIGHTS: &str = "/api/insights";
/// The route to read, edit and reset the budget and savings goals.
pub const GOALS: &str = "/api/goals";
