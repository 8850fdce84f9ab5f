//! Enumerations and field helpers for tasks and views.
//!
//! `Priority::coerce` and `is_truthy` are the only places where loose input is
//! turned into typed fields; the task factory and the load path both call them.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Task priority. Anything outside the three known values coerces to `Medium`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parse an exact lowercase priority name, substituting `Medium` otherwise.
    pub fn coerce(raw: &str) -> Priority {
        match raw {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            other => {
                tracing::warn!(priority = other, "unknown priority, using medium");
                Priority::Medium
            }
        }
    }

    /// Coerce an arbitrary JSON value; non-strings fall back to `Medium`.
    pub fn coerce_value(value: Option<&Value>) -> Priority {
        match value {
            Some(Value::String(s)) => Priority::coerce(s),
            _ => Priority::Medium,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Which derived view of the task list to produce.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Inbox,
    Today,
    ThisWeek,
    Project,
}

/// First day of the week used by the this-week view.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

/// JSON truthiness: `null`, `false`, `0` and `""` are false, everything else is true.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Read a truthy identifier, accepting strings and (legacy) numbers.
pub fn id_from_value(value: Option<&Value>) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_coerce() {
        assert_eq!(Priority::coerce("low"), Priority::Low);
        assert_eq!(Priority::coerce("high"), Priority::High);
        assert_eq!(Priority::coerce("bogus"), Priority::Medium);
        assert_eq!(Priority::coerce("HIGH"), Priority::Medium);
        assert_eq!(Priority::coerce_value(Some(&json!(3))), Priority::Medium);
        assert_eq!(Priority::coerce_value(None), Priority::Medium);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!("x"))));
        assert!(is_truthy(Some(&json!(1))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(is_truthy(Some(&json!({}))));
    }

    #[test]
    fn test_id_from_value() {
        assert_eq!(id_from_value(Some(&json!("abc"))), Some("abc".to_string()));
        assert_eq!(id_from_value(Some(&json!(1700000000000u64))), Some("1700000000000".to_string()));
        assert_eq!(id_from_value(Some(&json!(""))), None);
        assert_eq!(id_from_value(Some(&json!(true))), None);
    }
}
