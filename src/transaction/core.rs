//! Defines the canonical transaction model and the normalizer that builds it
//! from loosely shaped aggregator records.

use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use time::{Date, macros::format_description};

/// The name given to transactions that arrive without one.
pub const UNKNOWN_TRANSACTION_NAME: &str = "Unknown Transaction";
/// The category given to transactions that arrive without one.
pub const DEFAULT_CATEGORY: &str = "Other";
/// The label of the bucket holding transactions without a usable date.
pub const UNKNOWN_DATE_LABEL: &str = "Unknown Date";

// ============================================================================
// MODELS
// ============================================================================

/// When a transaction happened, if the source said so.
///
/// Dates that are missing or cannot be parsed as `YYYY-MM-DD` collapse into
/// [TransactionDate::Unknown]. `Unknown` orders before every known date, so a
/// descending sort places the unknown bucket last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionDate {
    /// A calendar date.
    Known(Date),
    /// The sentinel for a missing or malformed date.
    Unknown,
}

impl TransactionDate {
    /// Parse an ISO `YYYY-MM-DD` string, falling back to [TransactionDate::Unknown].
    pub fn parse(text: &str) -> Self {
        let format = format_description!("[year]-[month]-[day]");

        match Date::parse(text.trim(), &format) {
            Ok(date) => Self::Known(date),
            Err(_) => Self::Unknown,
        }
    }

    /// The calendar date, if known.
    pub fn date(&self) -> Option<Date> {
        match self {
            Self::Known(date) => Some(*date),
            Self::Unknown => None,
        }
    }
}

impl From<Date> for TransactionDate {
    fn from(date: Date) -> Self {
        Self::Known(date)
    }
}

impl Ord for TransactionDate {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Known(lhs), Self::Known(rhs)) => lhs.cmp(rhs),
            (Self::Known(_), Self::Unknown) => Ordering::Greater,
            (Self::Unknown, Self::Known(_)) => Ordering::Less,
            (Self::Unknown, Self::Unknown) => Ordering::Equal,
        }
    }
}

impl PartialOrd for TransactionDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for TransactionDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(date) => write!(f, "{date}"),
            Self::Unknown => write!(f, "{UNKNOWN_DATE_LABEL}"),
        }
    }
}

impl Serialize for TransactionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TransactionDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::parse(&text))
    }
}

/// An expense or income pulled from a linked bank account.
///
/// Amounts follow the aggregator's sign convention: a **negative** amount is
/// money coming in (a credit, i.e. income) and a **positive** amount is money
/// going out (a debit, i.e. an expense).
///
/// Build instances with [normalize_transactions] or [Transaction::build]; every
/// field is already defaulted so nothing downstream needs to re-check it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Display name, e.g. the merchant.
    pub name: String,
    /// Signed amount, negative = income, positive = expense.
    pub amount: f64,
    /// The most specific category the source supplied.
    pub category: String,
    /// When the transaction happened.
    pub date: TransactionDate,
    /// The owner of the transaction, opaque to every calculation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Transaction {
    /// Create a transaction with the default category and no owner.
    pub fn build(amount: f64, date: impl Into<TransactionDate>, name: &str) -> Self {
        Self {
            name: name.to_owned(),
            amount,
            category: DEFAULT_CATEGORY.to_owned(),
            date: date.into(),
            user_id: None,
        }
    }

    /// Set the category.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the owner.
    pub fn user_id(mut self, user_id: Option<&str>) -> Self {
        self.user_id = user_id.map(str::to_owned);
        self
    }

    /// Whether money came in.
    pub fn is_income(&self) -> bool {
        self.amount < 0.0
    }

    /// Whether money went out.
    pub fn is_expense(&self) -> bool {
        self.amount > 0.0
    }
}

// ============================================================================
// NORMALIZER
// ============================================================================

/// Coerce an aggregator response into canonical transactions.
///
/// Anything that is not a JSON array (including `null`) yields an empty list.
/// Array elements that are not objects are skipped. For each record:
/// - a missing or empty `name` becomes [UNKNOWN_TRANSACTION_NAME],
/// - a missing or non-numeric `amount` becomes `0`,
/// - a missing or empty `category` becomes [DEFAULT_CATEGORY]; for a category
///   hierarchy (an array) only the first segment is kept,
/// - a missing or malformed `date` becomes [TransactionDate::Unknown].
///
/// Normalizing the serialized output of this function returns the same list.
pub fn normalize_transactions(value: &Value) -> Vec<Transaction> {
    let Some(records) = value.as_array() else {
        tracing::debug!("expected an array of transactions, got {}", value_kind(value));
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|record| match record.as_object() {
            Some(_) => Some(normalize_transaction(record)),
            None => {
                tracing::debug!(
                    "skipping transaction record that is not an object: {}",
                    value_kind(record)
                );
                None
            }
        })
        .collect()
}

fn normalize_transaction(record: &Value) -> Transaction {
    let name = non_empty_str(&record["name"])
        .unwrap_or(UNKNOWN_TRANSACTION_NAME)
        .to_owned();

    let amount = parse_amount(&record["amount"]).unwrap_or(0.0);

    let category = match &record["category"] {
        Value::Array(segments) => segments.first().and_then(non_empty_str),
        other => non_empty_str(other),
    }
    .unwrap_or(DEFAULT_CATEGORY)
    .to_owned();

    let date = record["date"]
        .as_str()
        .map(TransactionDate::parse)
        .unwrap_or(TransactionDate::Unknown);

    let user_id = match &record["user_id"] {
        Value::String(user_id) => Some(user_id.clone()),
        Value::Number(user_id) => Some(user_id.to_string()),
        _ => None,
    };

    Transaction {
        name,
        amount,
        category,
        date,
        user_id,
    }
}

/// Read a finite number from a JSON number or a numeric string.
pub(crate) fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    amount.is_finite().then_some(amount)
}

pub(crate) fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|text| !text.is_empty())
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
