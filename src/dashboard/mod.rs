//! Dashboard module
//!
//! Provides the overview figures: the financial summary, the top spending
//! categories and budget and savings progress.

mod handlers;
mod insights;

pub use handlers::{get_insights_endpoint, get_summary_endpoint, get_top_categories_endpoint};
pub use insights::{
    GoalProgress, Insights, MIN_DEFAULT_MONTHLY_BUDGET, MIN_DEFAULT_SAVINGS_GOAL,
    compute_insights, default_monthly_budget, default_savings_goal,
};
