//! The user's monthly budget and savings goal.

mod core;
mod db;
mod handlers;

pub use core::{GoalAmount, GoalConfig, GoalEdit};
pub use db::{create_goal_table, get_goal_config, save_goal_config};
pub use handlers::{edit_goals_endpoint, get_goals_endpoint, reset_goals_endpoint};
