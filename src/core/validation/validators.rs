//! Reusable field validators
//!
//! Each validator receives the field name and its (already filtered) value.
//! Validators that only make sense for one JSON type let other types pass so
//! they can be combined freely; `required()` is the one that rejects absence.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Validator: field must be present, non-null and not a blank string
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Err(format!("'{}' is required", field)),
        Value::String(s) if s.trim().is_empty() => Err(format!("'{}' is required", field)),
        _ => Ok(()),
    }
}

/// Validator: field is optional (always valid)
pub fn optional() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, _: &Value| Ok(())
}

/// Validator: number must be strictly positive
pub fn positive() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_f64() {
        Some(num) if num <= 0.0 => Err(format!("'{}' must be positive (got {})", field, num)),
        _ => Ok(()),
    }
}

/// Validator: string length (in characters) must be within range
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        let Some(s) = value.as_str() else {
            return Ok(());
        };
        let len = s.chars().count();
        if len < min {
            Err(format!(
                "'{}' must be at least {} characters (got {})",
                field, min, len
            ))
        } else if len > max {
            Err(format!(
                "'{}' must be at most {} characters (got {})",
                field, max, len
            ))
        } else {
            Ok(())
        }
    }
}

/// Validator: value must be an integer within `min..=max`
pub fn integer_range(
    min: i64,
    max: i64,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if value.is_null() {
            return Ok(());
        }
        let Some(num) = value.as_i64() else {
            return Err(format!("'{}' must be a whole number", field));
        };
        if num < min {
            Err(format!("'{}' must be at least {} (got {})", field, min, num))
        } else if num > max {
            Err(format!("'{}' must be at most {} (got {})", field, max, num))
        } else {
            Ok(())
        }
    }
}

/// Validator: string must be one of the allowed values
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_str() {
        Some(s) if !allowed.iter().any(|a| a == s) => Err(format!(
            "'{}' must be one of {:?} (got {})",
            field, allowed, s
        )),
        _ => Ok(()),
    }
}

/// Validator: string must be an http(s) URL
pub fn url() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if !s.is_empty() && !is_valid_url(s) => {
            Err(format!("'{}' must be a valid URL (got {})", field, s))
        }
        _ => Ok(()),
    }
}

/// Validator: string must parse as a time of day in `format`
pub fn time_format(
    format: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| match value.as_str() {
        Some(s) if chrono::NaiveTime::parse_from_str(s, format).is_err() => Err(format!(
            "'{}' must use the format {} (got {})",
            field, format, s
        )),
        _ => Ok(()),
    }
}

fn is_valid_url(url: &str) -> bool {
    static URL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    URL_REGEX
        .get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").ok())
        .as_ref()
        .is_some_and(|regex| regex.is_match(url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === required() ===

    #[test]
    fn test_required_null_value_returns_error() {
        let v = required();
        let result = v("name", &json!(null));
        assert_eq!(result.unwrap_err(), "'name' is required");
    }

    #[test]
    fn test_required_blank_string_returns_error() {
        let v = required();
        assert!(v("teacherId", &json!("   ")).is_err());
    }

    #[test]
    fn test_required_values_return_ok() {
        let v = required();
        assert!(v("name", &json!("Math")).is_ok());
        assert!(v("capacity", &json!(0)).is_ok());
        assert!(v("schedules", &json!([])).is_ok());
    }

    #[test]
    fn test_optional_always_ok() {
        let v = optional();
        assert!(v("inviteCode", &json!(null)).is_ok());
    }

    // === positive() ===

    #[test]
    fn test_positive() {
        let v = positive();
        assert!(v("subjectId", &json!(0)).is_err());
        assert!(v("subjectId", &json!(-3)).is_err());
        assert!(v("subjectId", &json!(2)).is_ok());
        assert!(v("subjectId", &json!("x")).is_ok());
    }

    // === string_length() ===

    #[test]
    fn test_string_length_bounds() {
        let v = string_length(2, 5);
        assert!(v("name", &json!("a")).unwrap_err().contains("at least 2"));
        assert!(v("name", &json!("abcdef")).unwrap_err().contains("at most 5"));
        assert!(v("name", &json!("ab")).is_ok());
        assert!(v("name", &json!("abcde")).is_ok());
    }

    #[test]
    fn test_string_length_counts_characters() {
        let v = string_length(1, 4);
        assert!(v("name", &json!("éèêë")).is_ok());
    }

    #[test]
    fn test_string_length_non_string_passthrough() {
        let v = string_length(5, 10);
        assert!(v("age", &json!(42)).is_ok());
    }

    // === integer_range() ===

    #[test]
    fn test_integer_range() {
        let v = integer_range(1, 500);
        assert!(v("capacity", &json!(1)).is_ok());
        assert!(v("capacity", &json!(500)).is_ok());
        assert!(v("capacity", &json!(0)).unwrap_err().contains("at least 1"));
        assert!(v("capacity", &json!(501)).unwrap_err().contains("at most 500"));
        assert!(v("capacity", &json!(2.5)).unwrap_err().contains("whole number"));
        assert!(v("capacity", &json!(null)).is_ok());
    }

    // === in_list() ===

    #[test]
    fn test_in_list() {
        let v = in_list(vec!["active".into(), "inactive".into()]);
        assert!(v("status", &json!("active")).is_ok());
        assert!(v("status", &json!("archived")).unwrap_err().contains("one of"));
        assert!(v("status", &json!(1)).is_ok());
    }

    // === url() ===

    #[test]
    fn test_url() {
        let v = url();
        assert!(v("bannerUrl", &json!("https://res.example.com/a.png")).is_ok());
        assert!(v("bannerUrl", &json!("ftp://x")).is_err());
        assert!(v("bannerUrl", &json!("")).is_ok());
    }

    // === time_format() ===

    #[test]
    fn test_time_format() {
        let v = time_format("%H:%M");
        assert!(v("startTime", &json!("09:30")).is_ok());
        assert!(v("startTime", &json!("9h30")).is_err());
        assert!(v("startTime", &json!(930)).is_ok());
    }
}
