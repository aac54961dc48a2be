//! Balance, income and expense totals for a set of transactions.

use serde::{Serialize, Serializer};

use super::core::Transaction;

/// Income, expenses and their difference for a set of transactions.
///
/// Totals are held as whole cents so that `balance == income - expenses`
/// holds exactly after formatting. Serializing produces the two-decimal
/// strings clients expect, e.g. `{"balance": "60.00", "income": "100.00",
/// "expenses": "40.00"}`; callers that need to do further arithmetic should
/// use the numeric accessors instead of re-parsing those strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FinancialSummary {
    #[serde(serialize_with = "serialize_cents")]
    balance: i64,
    #[serde(serialize_with = "serialize_cents")]
    income: i64,
    #[serde(serialize_with = "serialize_cents")]
    expenses: i64,
}

impl FinancialSummary {
    /// Money in minus money out. May be negative.
    pub fn balance(&self) -> f64 {
        cents_to_f64(self.balance)
    }

    /// Total money in, never negative.
    pub fn income(&self) -> f64 {
        cents_to_f64(self.income)
    }

    /// Total money out, never negative.
    pub fn expenses(&self) -> f64 {
        cents_to_f64(self.expenses)
    }
}

/// Summarize `transactions`.
///
/// Income is the sum of the absolute amounts of negative transactions and
/// expenses is the sum of positive ones. Zero-amount transactions count as
/// neither. An empty slice gives the zero summary.
pub fn summarize(transactions: &[Transaction]) -> FinancialSummary {
    let (income, expenses) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expenses), transaction| {
                if transaction.is_income() {
                    (income + transaction.amount.abs(), expenses)
                } else if transaction.is_expense() {
                    (income, expenses + transaction.amount)
                } else {
                    (income, expenses)
                }
            });

    let income = to_cents(income);
    let expenses = to_cents(expenses);

    FinancialSummary {
        balance: income - expenses,
        income,
        expenses,
    }
}

/// Round `amount` to whole cents.
pub(crate) fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn cents_to_f64(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Format whole cents with exactly two decimal places, e.g. `-1234` -> `"-12.34"`.
pub(crate) fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

fn serialize_cents<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_cents(*cents))
}
