//! Bank account snapshots from the aggregator and the savings account filter.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    Error,
    transaction::core::{non_empty_str, parse_amount, value_kind},
};

/// The name given to accounts that arrive without one.
pub const UNKNOWN_ACCOUNT_NAME: &str = "Unknown Account";

/// A bank account or credit card as reported by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The aggregator's identifier for the account.
    pub id: String,
    /// The account's display name, e.g. "Plaid Saving".
    pub name: String,
    /// The account type, e.g. "depository" or "credit".
    #[serde(rename = "type")]
    pub account_type: Option<String>,
    /// The account subtype, e.g. "checking" or "savings".
    pub subtype: Option<String>,
    /// The current balance, if the aggregator knows it.
    pub balance: Option<f64>,
    /// The ISO currency code of the balance.
    pub currency: Option<String>,
}

impl Account {
    /// Whether this is a deposit account used for savings.
    ///
    /// That is the case when its type is "depository" and either its subtype
    /// is "savings" or its name mentions "saving" in any case.
    pub fn is_savings(&self) -> bool {
        let is_depository = self.account_type.as_deref() == Some("depository");
        let is_savings_subtype = self.subtype.as_deref() == Some("savings");
        let has_savings_name = self.name.to_lowercase().contains("saving");

        is_depository && (is_savings_subtype || has_savings_name)
    }
}

/// Coerce an aggregator accounts response into [Account]s.
///
/// Both the flat shape (`id`, `balance`, `currency`) and the aggregator's
/// nested shape (`account_id`, `balances.current`, `balances.iso_currency_code`)
/// are understood. Non-array input yields an empty list and non-object
/// elements are skipped.
pub fn normalize_accounts(value: &Value) -> Vec<Account> {
    let Some(records) = value.as_array() else {
        tracing::debug!("expected an array of accounts, got {}", value_kind(value));
        return Vec::new();
    };

    records
        .iter()
        .filter(|record| record.is_object())
        .map(|record| {
            let id = match (&record["id"], &record["account_id"]) {
                (Value::String(id), _) | (_, Value::String(id)) => id.clone(),
                (Value::Number(id), _) => id.to_string(),
                _ => String::new(),
            };

            Account {
                id,
                name: non_empty_str(&record["name"])
                    .unwrap_or(UNKNOWN_ACCOUNT_NAME)
                    .to_owned(),
                account_type: non_empty_str(&record["type"]).map(str::to_owned),
                subtype: non_empty_str(&record["subtype"]).map(str::to_owned),
                balance: parse_amount(&record["balance"])
                    .or_else(|| parse_amount(&record["balances"]["current"])),
                currency: non_empty_str(&record["currency"])
                    .or_else(|| non_empty_str(&record["balances"]["iso_currency_code"]))
                    .map(str::to_owned),
            }
        })
        .collect()
}

/// The latest account list, shared between request handlers.
///
/// Accounts are a snapshot from the aggregator and are replaced wholesale,
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct AccountSnapshot(Arc<RwLock<Vec<Account>>>);

impl AccountSnapshot {
    /// A copy of the current accounts.
    pub fn get(&self) -> Result<Vec<Account>, Error> {
        self.0
            .read()
            .map(|accounts| accounts.clone())
            .inspect_err(|error| tracing::error!("could not read account snapshot: {error}"))
            .map_err(|_| Error::LockError)
    }

    /// Replace the current accounts.
    pub fn replace(&self, accounts: Vec<Account>) -> Result<(), Error> {
        let mut current = self
            .0
            .write()
            .inspect_err(|error| tracing::error!("could not write account snapshot: {error}"))
            .map_err(|_| Error::LockError)?;

        *current = accounts;
        Ok(())
    }
}
