//! Declarative form schemas
//!
//! A [`FormSchema`] lists the fields a form accepts. Each field carries a
//! chain of filters (run first, in order) and a chain of validators (run on
//! the filtered value). Fields not declared in the schema are dropped from
//! the payload.

use crate::core::error::ValidationError;
use serde_json::{Map, Value};
use std::sync::Arc;

type FieldValidator = Arc<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type FieldFilter = Arc<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;

/// Filters and validators for one field
#[derive(Clone, Default)]
pub struct FieldRule {
    filters: Vec<FieldFilter>,
    validators: Vec<FieldValidator>,
    default: Option<Value>,
}

impl FieldRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter to run before validation
    pub fn filter(
        mut self,
        filter: impl Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Add a validator
    pub fn validate(
        mut self,
        validator: impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Value used when the field is missing from the payload
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn apply(&self, field: &str, value: Value, errors: &mut Vec<String>) -> Value {
        let mut value = value;
        for filter in &self.filters {
            match filter(field, value.clone()) {
                Ok(filtered) => value = filtered,
                Err(e) => {
                    errors.push(e.to_string());
                    return value;
                }
            }
        }

        for validator in &self.validators {
            if let Err(message) = validator(field, &value) {
                errors.push(message);
            }
        }

        value
    }
}

/// Validation schema for one form
#[derive(Clone)]
pub struct FormSchema {
    name: String,
    fields: Vec<(String, FieldRule)>,
}

impl FormSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declare a field
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.fields.push((name.into(), rule));
        self
    }

    /// Name of the form, used in logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared field names, in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Filter and validate `payload`.
    ///
    /// Returns the cleaned object, or every field message collected.
    pub fn validate_and_filter(&self, payload: Value) -> Result<Value, ValidationError> {
        let Value::Object(mut input) = payload else {
            return Err(ValidationError::NotAnObject);
        };

        let mut output = Map::new();
        let mut errors = Vec::new();

        for (field, rule) in &self.fields {
            let raw = input
                .remove(field)
                .or_else(|| rule.default.clone())
                .unwrap_or(Value::Null);
            let value = rule.apply(field, raw, &mut errors);
            if !value.is_null() {
                output.insert(field.clone(), value);
            }
        }

        if !input.is_empty() {
            tracing::debug!(
                form = %self.name,
                dropped = ?input.keys().collect::<Vec<_>>(),
                "undeclared fields dropped"
            );
        }

        if errors.is_empty() {
            Ok(Value::Object(output))
        } else {
            Err(ValidationError::FieldErrors(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::filters::trim;
    use crate::core::validation::validators::{required, string_length};
    use serde_json::json;

    fn schema() -> FormSchema {
        FormSchema::new("room")
            .field(
                "label",
                FieldRule::new()
                    .filter(trim())
                    .validate(required())
                    .validate(string_length(2, 10)),
            )
            .field("seats", FieldRule::new().default_value(20))
    }

    #[test]
    fn test_filters_run_before_validators() {
        let cleaned = schema()
            .validate_and_filter(json!({"label": "  B12  "}))
            .unwrap();
        assert_eq!(cleaned, json!({"label": "B12", "seats": 20}));
    }

    #[test]
    fn test_collects_all_errors() {
        let err = schema()
            .validate_and_filter(json!({"label": "   "}))
            .unwrap_err();
        let ValidationError::FieldErrors(errors) = err else {
            panic!("expected field errors");
        };
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("required"));
    }

    #[test]
    fn test_undeclared_fields_are_dropped() {
        let cleaned = schema()
            .validate_and_filter(json!({"label": "B12", "seats": 8, "admin": true}))
            .unwrap();
        assert_eq!(cleaned, json!({"label": "B12", "seats": 8}));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert_eq!(
            schema().validate_and_filter(json!([1, 2])),
            Err(ValidationError::NotAnObject)
        );
    }

    #[test]
    fn test_field_names_keep_declaration_order() {
        let schema = schema();
        let names: Vec<&str> = schema.field_names().collect();
        assert_eq!(names, vec!["label", "seats"]);
    }
}
