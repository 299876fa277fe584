//! Wire types shared by the client and the UI.
//!
//! Field names match the remote API's JSON exactly, so no serde renames are
//! needed.

use serde::{Deserialize, Serialize};

/// Authenticated account identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
}

/// A fitness goal as stored on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub target: f64,
    pub unit: String,
    #[serde(default)]
    pub current: f64,
}

/// Unsubmitted goal form data. Also the `POST /api/goals` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalDraft {
    pub name: String,
    pub description: String,
    pub target: Option<f64>,
    pub unit: String,
}

impl GoalDraft {
    /// Parse a raw text input into a target value.
    ///
    /// Empty, non-numeric and non-finite input all mean "absent".
    pub fn parse_target(input: &str) -> Option<f64> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Text shown in the target input for the current value.
    pub fn target_input(&self) -> String {
        self.target.map(|t| t.to_string()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Body of a successful login or register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Optional `{ "message": ... }` body the server sends with errors.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(GoalDraft::parse_target("5"), Some(5.0));
        assert_eq!(GoalDraft::parse_target(" 2.5 "), Some(2.5));
        assert_eq!(GoalDraft::parse_target(""), None);
        assert_eq!(GoalDraft::parse_target("abc"), None);
        assert_eq!(GoalDraft::parse_target("NaN"), None);
        assert_eq!(GoalDraft::parse_target("inf"), None);
    }

    #[test]
    fn test_draft_body_serializes_missing_target_as_null() {
        let draft = GoalDraft {
            name: "Run".into(),
            ..Default::default()
        };
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["target"], serde_json::Value::Null);
        assert_eq!(body["name"], "Run");
    }

    #[test]
    fn test_goal_current_defaults_to_zero() {
        let goal: Goal = serde_json::from_str(
            r#"{"id":1,"name":"Run","description":"d","target":5,"unit":"km"}"#,
        )
        .unwrap();
        assert_eq!(goal.current, 0.0);
        assert_eq!(goal.target, 5.0);
    }
}
