//! Grouping logic for transactions (day groups).

use std::collections::BTreeMap;

use serde::Serialize;

use super::core::{Transaction, TransactionDate};

/// The transactions that share a date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    /// The shared date, or the unknown-date bucket.
    pub date: TransactionDate,
    /// Transactions in the order they were given.
    pub transactions: Vec<Transaction>,
}

/// Group transactions by date, most recent date first.
///
/// Within a day the input order is preserved. Transactions without a usable
/// date form a single [TransactionDate::Unknown] group, which always comes
/// last because it sorts before every real date.
pub fn group_by_date(transactions: &[Transaction]) -> Vec<DayGroup> {
    let mut days: BTreeMap<TransactionDate, Vec<Transaction>> = BTreeMap::new();

    for transaction in transactions {
        days.entry(transaction.date)
            .or_default()
            .push(transaction.clone());
    }

    days.into_iter()
        .rev()
        .map(|(date, transactions)| DayGroup { date, transactions })
        .collect()
}
