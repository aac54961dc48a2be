//! Goal Config Persistence
//!
//! Saves and loads the user's budget and savings goals as key/value rows.

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

use super::core::{GoalAmount, GoalConfig};

const MONTHLY_BUDGET_KEY: &str = "monthly_budget";
const SAVINGS_GOAL_KEY: &str = "savings_goal";

/// Create the goal table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS goal (
            key TEXT PRIMARY KEY,
            value REAL NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Saves the goal config, replacing whatever was stored before.
///
/// Goals that are `None` are removed so that the derived defaults apply.
///
/// # Errors
/// Returns [Error::SqlError] if the database transaction fails.
pub fn save_goal_config(config: &GoalConfig, connection: &Connection) -> Result<(), Error> {
    let transaction = connection.unchecked_transaction()?;

    for (key, amount) in [
        (MONTHLY_BUDGET_KEY, config.monthly_budget),
        (SAVINGS_GOAL_KEY, config.savings_goal),
    ] {
        match amount {
            Some(amount) => transaction.execute(
                "INSERT INTO goal (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                (key, amount.as_f64()),
            )?,
            None => transaction.execute("DELETE FROM goal WHERE key = ?1", [key])?,
        };
    }

    transaction.commit()?;
    Ok(())
}

/// Gets the stored goal config.
///
/// Stored values are validated again, anything that is not a valid
/// [GoalAmount] is ignored so the derived default applies instead.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query fails.
pub fn get_goal_config(connection: &Connection) -> Result<GoalConfig, Error> {
    Ok(GoalConfig {
        monthly_budget: get_goal(MONTHLY_BUDGET_KEY, connection)?,
        savings_goal: get_goal(SAVINGS_GOAL_KEY, connection)?,
    })
}

fn get_goal(key: &str, connection: &Connection) -> Result<Option<GoalAmount>, Error> {
    let value: Option<f64> = connection
        .query_row("SELECT value FROM goal WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?;

    Ok(value.and_then(|value| {
        GoalAmount::new(value)
            .inspect_err(|error| tracing::warn!("ignoring stored {key}: {error}"))
            .ok()
    }))
}
