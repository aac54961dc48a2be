//! Core goal domain types: validated goal amounts and the user's goal config.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

/// A validated, positive, finite amount of money for a budget or savings goal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct GoalAmount(f64);

impl GoalAmount {
    /// Create a goal amount.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidGoal] if `amount` is zero,
    /// negative, NaN or infinite.
    pub fn new(amount: f64) -> Result<Self, Error> {
        if amount.is_finite() && amount > 0.0 {
            Ok(Self(amount))
        } else {
            Err(Error::InvalidGoal(amount.to_string()))
        }
    }

    /// Parse a goal amount from user input, e.g. `"1500"` or `" 2500.50 "`.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::InvalidGoal] if `text` is not a
    /// number or is not a valid amount per [GoalAmount::new].
    pub fn parse(text: &str) -> Result<Self, Error> {
        text.trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidGoal(text.to_owned()))
            .and_then(Self::new)
    }

    /// The amount.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl TryFrom<&Value> for GoalAmount {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(number) => number
                .as_f64()
                .ok_or_else(|| Error::InvalidGoal(number.to_string()))
                .and_then(Self::new),
            Value::String(text) => Self::parse(text),
            other => Err(Error::InvalidGoal(other.to_string())),
        }
    }
}

impl Display for GoalAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user's configured goals. A missing goal means "use the derived default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GoalConfig {
    /// The most the user wants to spend in a calendar month.
    pub monthly_budget: Option<GoalAmount>,
    /// The savings balance the user is working towards.
    pub savings_goal: Option<GoalAmount>,
}

/// A requested change to the goal config, as sent by a client.
///
/// Values may be JSON numbers or numeric strings. Omitted fields are left
/// unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct GoalEdit {
    /// The new monthly budget, if it should change.
    #[serde(default)]
    pub monthly_budget: Option<Value>,
    /// The new savings goal, if it should change.
    #[serde(default)]
    pub savings_goal: Option<Value>,
}

impl GoalConfig {
    /// Apply `edit`, returning the new config.
    ///
    /// Every supplied value is validated before anything changes, so a
    /// rejected edit leaves `self` exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidGoal] for the first value that is not a
    /// positive number.
    pub fn apply(&self, edit: &GoalEdit) -> Result<GoalConfig, Error> {
        let monthly_budget = edit
            .monthly_budget
            .as_ref()
            .map(GoalAmount::try_from)
            .transpose()?;
        let savings_goal = edit
            .savings_goal
            .as_ref()
            .map(GoalAmount::try_from)
            .transpose()?;

        Ok(GoalConfig {
            monthly_budget: monthly_budget.or(self.monthly_budget),
            savings_goal: savings_goal.or(self.savings_goal),
        })
    }
}


#[cfg(test)]
mod goal_config_tests {
    use serde_json::json;

    use crate::Error;

    use super::{GoalAmount, GoalConfig, GoalEdit};

    fn config(monthly_budget: f64, savings_goal: f64) -> GoalConfig {
        GoalConfig {
            monthly_budget: Some(GoalAmount::new(monthly_budget).unwrap()),
            savings_goal: Some(GoalAmount::new(savings_goal).unwrap()),
        }
    }

    #[test]
    fn applies_valid_edits() {
        let edit = GoalEdit {
            monthly_budget: Some(json!(2000)),
            savings_goal: None,
        };

        let got = config(1500.0, 10000.0).apply(&edit).unwrap();

        assert_eq!(got, config(2000.0, 10000.0));
    }

    #[test]
    fn negative_budget_is_rejected_and_previous_value_kept() {
        let previous = config(1500.0, 10000.0);
        let edit = GoalEdit {
            monthly_budget: Some(json!(-5)),
            savings_goal: None,
        };

        let got = previous.apply(&edit);

        assert_eq!(got, Err(Error::InvalidGoal("-5".to_owned())));
        assert_eq!(previous, config(1500.0, 10000.0));
    }

    #[test]
    fn one_invalid_value_rejects_the_whole_edit() {
        let edit = GoalEdit {
            monthly_budget: Some(json!(1800)),
            savings_goal: Some(json!("a lot")),
        };

        assert!(GoalConfig::default().apply(&edit).is_err());
    }

    #[test]
    fn empty_edit_changes_nothing() {
        let previous = config(1.0, 2.0);

        assert_eq!(previous.apply(&GoalEdit::default()).unwrap(), previous);
    }
}
