//! Endpoints for reading, editing and resetting the goal config.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{AppState, Error};

use super::{
    core::{GoalConfig, GoalEdit},
    db::{get_goal_config, save_goal_config},
};

/// The state needed for managing goals.
#[derive(Debug, Clone)]
pub struct GoalState {
    /// The database connection for managing goals.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GoalState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Get the user's goal config. Goals that were never set are `null`.
pub async fn get_goals_endpoint(
    State(state): State<GoalState>,
) -> Result<Json<GoalConfig>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::LockError)?;

    get_goal_config(&connection)
        .inspect_err(|error| tracing::error!("could not get goal config: {error}"))
        .map(Json)
}

/// Change one or both goals.
///
/// If any value in the edit is invalid nothing is saved and the client gets
/// a 400 response.
pub async fn edit_goals_endpoint(
    State(state): State<GoalState>,
    Json(edit): Json<GoalEdit>,
) -> Result<Json<GoalConfig>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::LockError)?;

    let current = get_goal_config(&connection)
        .inspect_err(|error| tracing::error!("could not get goal config: {error}"))?;
    let updated = current
        .apply(&edit)
        .inspect_err(|error| tracing::debug!("rejected goal edit: {error}"))?;

    save_goal_config(&updated, &connection)
        .inspect_err(|error| tracing::error!("could not save goal config: {error}"))?;

    Ok(Json(updated))
}

/// Forget both goals so that the derived defaults apply again.
pub async fn reset_goals_endpoint(
    State(state): State<GoalState>,
) -> Result<Json<GoalConfig>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::LockError)?;

    let config = GoalConfig::default();
    save_goal_config(&config, &connection)
        .inspect_err(|error| tracing::error!("could not reset goal config: {error}"))?;

    Ok(Json(config))
}
