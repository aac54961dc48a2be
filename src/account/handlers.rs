//! Endpoints for reading and replacing the account snapshot.

use axum::{Json, extract::State};
use serde_json::Value;

use crate::Error;

use super::core::{Account, AccountSnapshot, normalize_accounts};

/// Get the current account snapshot.
pub async fn get_accounts_endpoint(
    State(snapshot): State<AccountSnapshot>,
) -> Result<Json<Vec<Account>>, Error> {
    snapshot.get().map(Json)
}

/// Replace the account snapshot with the aggregator's latest accounts.
///
/// The body may be the aggregator's account array or a response object with
/// an `accounts` field. Responds with the normalized accounts.
pub async fn replace_accounts_endpoint(
    State(snapshot): State<AccountSnapshot>,
    Json(body): Json<Value>,
) -> Result<Json<Vec<Account>>, Error> {
    let records = body.get("accounts").unwrap_or(&body);
    let accounts = normalize_accounts(records);

    snapshot.replace(accounts.clone())?;
    tracing::info!("replaced account snapshot with {} accounts", accounts.len());

    Ok(Json(accounts))
}

#[cfg(test)]
mod tests {
    use axum::{Json, extract::State};
    use serde_json::json;

    use crate::account::AccountSnapshot;

    use super::{get_accounts_endpoint, replace_accounts_endpoint};

    #[tokio::test]
    async fn replaced_accounts_are_returned_by_get() {
        let snapshot = AccountSnapshot::default();
        let body = json!({"accounts": [
            {"account_id": "a1", "name": "Plaid Saving", "type": "depository", "subtype": "savings",
             "balances": {"current": 210, "iso_currency_code": "USD"}}
        ]});

        let Json(replaced) = replace_accounts_endpoint(State(snapshot.clone()), Json(body))
            .await
            .unwrap();
        let Json(got) = get_accounts_endpoint(State(snapshot)).await.unwrap();

        assert_eq!(replaced, got);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].balance, Some(210.0));
    }

    #[tokio::test]
    async fn starts_empty() {
        let Json(got) = get_accounts_endpoint(State(AccountSnapshot::default()))
            .await
            .unwrap();

        assert!(got.is_empty());
    }
}
