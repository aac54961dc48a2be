//! Budget and savings progress derived from accounts, transactions and goals.

use serde::Serialize;
use time::Date;

use crate::{account::Account, goal::GoalConfig, transaction::Transaction};

/// The smallest monthly budget suggested when the user has not set one.
pub const MIN_DEFAULT_MONTHLY_BUDGET: f64 = 1500.0;
/// The smallest savings goal suggested when the user has not set one.
pub const MIN_DEFAULT_SAVINGS_GOAL: f64 = 10000.0;

/// How far along a goal is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    /// The amount spent or saved so far.
    pub current: f64,
    /// The goal amount.
    pub total: f64,
    /// `current / total` as a whole percentage in `0..=100`.
    pub percentage: u8,
    /// `total - current`; negative when the goal has been exceeded.
    pub remaining: f64,
    /// Whether `total` came from the user rather than the derived default.
    pub is_custom: bool,
}

impl GoalProgress {
    fn new(current: f64, total: f64, is_custom: bool) -> Self {
        Self {
            current,
            total,
            percentage: progress_percentage(current, total),
            remaining: total - current,
            is_custom,
        }
    }
}

/// The figures behind the budget and savings widgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    /// Whether any account looks like a savings account.
    pub has_savings_accounts: bool,
    /// The sum of savings account balances.
    pub current_savings: f64,
    /// The sum of expenses dated in the current calendar month.
    pub current_month_expenses: f64,
    /// Spending this month against the monthly budget.
    pub budget: GoalProgress,
    /// Savings against the savings goal. `None` without savings accounts.
    pub savings: Option<GoalProgress>,
}

/// Combine accounts, transactions and goals into progress indicators.
///
/// `today` decides which calendar month counts as the current one. Goals the
/// user has not set are derived from the data, see [default_monthly_budget]
/// and [default_savings_goal].
pub fn compute_insights(
    accounts: &[Account],
    transactions: &[Transaction],
    goals: &GoalConfig,
    today: Date,
) -> Insights {
    let savings_accounts: Vec<&Account> = accounts.iter().filter(|a| a.is_savings()).collect();
    let has_savings_accounts = !savings_accounts.is_empty();
    let current_savings: f64 = savings_accounts
        .iter()
        .map(|account| account.balance.unwrap_or(0.0))
        .sum();

    let current_month_expenses = current_month_expenses(transactions, today);

    let budget = match goals.monthly_budget {
        Some(amount) => GoalProgress::new(current_month_expenses, amount.as_f64(), true),
        None => GoalProgress::new(
            current_month_expenses,
            default_monthly_budget(current_month_expenses),
            false,
        ),
    };

    let savings = has_savings_accounts.then(|| match goals.savings_goal {
        Some(amount) => GoalProgress::new(current_savings, amount.as_f64(), true),
        None => GoalProgress::new(
            current_savings,
            default_savings_goal(current_savings),
            false,
        ),
    });

    Insights {
        has_savings_accounts,
        current_savings,
        current_month_expenses,
        budget,
        savings,
    }
}

/// The transactions dated in the same calendar month and year as `today`.
pub fn in_current_month(transactions: &[Transaction], today: Date) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| is_in_month_of(transaction, today))
        .cloned()
        .collect()
}

/// The sum of expenses dated in the same calendar month and year as `today`.
pub fn current_month_expenses(transactions: &[Transaction], today: Date) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.is_expense() && is_in_month_of(transaction, today))
        .map(|transaction| transaction.amount)
        .sum()
}

fn is_in_month_of(transaction: &Transaction, today: Date) -> bool {
    transaction
        .date
        .date()
        .is_some_and(|date| date.year() == today.year() && date.month() == today.month())
}

/// 120% of this month's spending rounded to the nearest 100, but at least
/// [MIN_DEFAULT_MONTHLY_BUDGET].
pub fn default_monthly_budget(current_month_expenses: f64) -> f64 {
    round_to_nearest(current_month_expenses * 1.2, 100.0).max(MIN_DEFAULT_MONTHLY_BUDGET)
}

/// 150% of current savings rounded to the nearest 1000, but at least
/// [MIN_DEFAULT_SAVINGS_GOAL].
pub fn default_savings_goal(current_savings: f64) -> f64 {
    round_to_nearest(current_savings * 1.5, 1000.0).max(MIN_DEFAULT_SAVINGS_GOAL)
}

fn round_to_nearest(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

/// `current / total` as a whole percentage clamped to `0..=100`.
///
/// A total that is not positive gives 0 rather than dividing by zero.
pub fn progress_percentage(current: f64, total: f64) -> u8 {
    if total.is_nan() || total <= 0.0 || !current.is_finite() {
        return 0;
    }

    ((current / total) * 100.0).round().clamp(0.0, 100.0) as u8
}
