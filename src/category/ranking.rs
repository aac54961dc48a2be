//! Ranks categories by how much was spent in them.

use std::collections::HashMap;

use serde::Serialize;

use crate::transaction::Transaction;

/// Total spending in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category name.
    pub name: String,
    /// The sum of the category's expenses.
    pub amount: f64,
    /// The category's share of all expenses, as a whole percentage.
    pub percentage: i64,
}

/// The `n` categories with the largest total expenses, largest first.
///
/// Only expenses (`amount > 0`) are counted. Categories with equal totals keep
/// the order in which they were first seen. Percentages are relative to the
/// total expenses of `transactions`, so callers should pass the transactions
/// of the period they are reporting on.
pub fn top_categories(transactions: &[Transaction], n: usize) -> Vec<CategoryTotal> {
    let mut totals: Vec<(&str, f64)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        let category = transaction.category.as_str();
        match positions.get(category).copied() {
            Some(position) => totals[position].1 += transaction.amount,
            None => {
                positions.insert(category, totals.len());
                totals.push((category, transaction.amount));
            }
        }
    }

    let total_expenses: f64 = totals.iter().map(|(_, amount)| amount).sum();

    // `sort_by` is stable, so ties keep their first-seen order.
    totals.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

    totals
        .into_iter()
        .take(n)
        .map(|(name, amount)| CategoryTotal {
            name: name.to_owned(),
            amount,
            percentage: percent_of(amount, total_expenses),
        })
        .collect()
}

fn percent_of(value: f64, total: f64) -> i64 {
    let total = if total == 0.0 { 1.0 } else { total };

    ((value / total) * 100.0).round() as i64
}
