//! Argument-bag validation for tool inputs.
//!
//! Every violation is collected before reporting, so a caller that got three
//! fields wrong hears about all three at once instead of fixing them one
//! round-trip at a time. Validation runs on the raw JSON bag; typed input
//! structs are only deserialized after it passes.

use serde_json::Value;

use crate::error::{ToolError, ToolResult};
use crate::models::EntityType;

/// Collects violations against a raw argument object.
pub struct Validator<'a> {
    args: &'a Value,
    violations: Vec<String>,
}

impl<'a> Validator<'a> {
    /// Start validating an argument bag.
    #[must_use]
    pub fn new(args: &'a Value) -> Self {
        let mut violations = Vec::new();
        if !args.is_object() && !args.is_null() {
            violations.push("arguments: must be an object".to_string());
        }
        Self { args, violations }
    }

    /// Treat JSON null the same as an absent field.
    fn field(&self, name: &str) -> Option<&'a Value> {
        self.args.get(name).filter(|v| !v.is_null())
    }

    /// Record a violation directly.
    pub fn violation(&mut self, message: impl Into<String>) -> &mut Self {
        self.violations.push(message.into());
        self
    }

    /// The field must be present and a non-empty string.
    pub fn require_string(&mut self, name: &str) -> &mut Self {
        match self.field(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            Some(Value::String(_)) => self.violations.push(format!("{name}: must not be empty")),
            Some(_) => self.violations.push(format!("{name}: must be a string")),
            None => self.violations.push(format!("{name}: required")),
        }
        self
    }

    /// The field, when present, must be a string.
    pub fn optional_string(&mut self, name: &str) -> &mut Self {
        if let Some(value) = self.field(name) {
            if !value.is_string() {
                self.violations.push(format!("{name}: must be a string"));
            }
        }
        self
    }

    /// The field, when present, must be a boolean.
    pub fn optional_bool(&mut self, name: &str) -> &mut Self {
        if let Some(value) = self.field(name) {
            if !value.is_boolean() {
                self.violations.push(format!("{name}: must be a boolean"));
            }
        }
        self
    }

    /// The field, when present, must be an integer within `[min, max]`.
    pub fn optional_int(&mut self, name: &str, min: i64, max: i64) -> &mut Self {
        if let Some(value) = self.field(name) {
            match value.as_i64() {
                Some(n) if n >= min && n <= max => {}
                Some(n) => self
                    .violations
                    .push(format!("{name}: must be between {min} and {max}, got {n}")),
                None => self.violations.push(format!("{name}: must be an integer")),
            }
        }
        self
    }

    /// The field, when present, must be an array of strings.
    pub fn optional_string_list(&mut self, name: &str) -> &mut Self {
        if let Some(value) = self.field(name) {
            match value.as_array() {
                Some(items) if items.iter().all(Value::is_string) => {}
                _ => self.violations.push(format!("{name}: must be an array of strings")),
            }
        }
        self
    }

    /// The field must be an array of strings with a bounded length.
    pub fn require_string_list(&mut self, name: &str, min_len: usize, max_len: usize) -> &mut Self {
        match self.field(name) {
            Some(Value::Array(items)) => {
                if !items.iter().all(Value::is_string) {
                    self.violations.push(format!("{name}: must be an array of strings"));
                } else if items.len() < min_len || items.len() > max_len {
                    self.violations.push(format!(
                        "{name}: must have between {min_len} and {max_len} entries, got {}",
                        items.len()
                    ));
                }
            }
            Some(_) => self.violations.push(format!("{name}: must be an array of strings")),
            None => self.violations.push(format!("{name}: required")),
        }
        self
    }

    /// The field must name one of the seven entity types.
    pub fn require_entity_type(&mut self, name: &str) -> &mut Self {
        match self.field(name) {
            Some(Value::String(s)) => {
                if !EntityType::ALL.iter().any(|e| e.as_str() == s) {
                    let allowed: Vec<&str> =
                        EntityType::ALL.iter().map(|e| e.as_str()).collect();
                    self.violations.push(format!(
                        "{name}: unknown value '{s}', expected one of {}",
                        allowed.join(", ")
                    ));
                }
            }
            Some(_) => self.violations.push(format!("{name}: must be a string")),
            None => self.violations.push(format!("{name}: required")),
        }
        self
    }

    /// When both fields are integers, the first must not exceed the second.
    pub fn ordered_int_pair(&mut self, low: &str, high: &str) -> &mut Self {
        if let (Some(a), Some(b)) = (
            self.field(low).and_then(Value::as_i64),
            self.field(high).and_then(Value::as_i64),
        ) {
            if a > b {
                self.violations.push(format!("{low}: must not exceed {high} ({a} > {b})"));
            }
        }
        self
    }

    /// Produce the aggregated result.
    ///
    /// # Errors
    ///
    /// Returns a single validation error listing every collected violation.
    pub fn finish(self) -> ToolResult<()> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ToolError::validation(self.violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_args_pass() {
        let args = json!({"search": "ml", "per_page": 50, "is_open_access": true});
        let mut v = Validator::new(&args);
        v.optional_string("search").optional_int("per_page", 1, 200).optional_bool(
            "is_open_access",
        );
        assert!(v.finish().is_ok());
    }

    #[test]
    fn test_every_violation_is_collected() {
        let args = json!({"per_page": 500, "entity_type": "journals"});
        let mut v = Validator::new(&args);
        v.require_string("query").optional_int("per_page", 1, 200).require_entity_type(
            "entity_type",
        );

        let err = v.finish().unwrap_err();
        let msg = err.to_user_message();
        assert!(msg.contains("query: required"));
        assert!(msg.contains("per_page"));
        assert!(msg.contains("journals"));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let args = json!({"search": null});
        let mut v = Validator::new(&args);
        v.optional_string("search");
        assert!(v.finish().is_ok());

        let mut v = Validator::new(&args);
        v.require_string("search");
        assert!(v.finish().is_err());
    }

    #[test]
    fn test_non_integer_number_is_rejected() {
        let args = json!({"page": 1.5});
        let mut v = Validator::new(&args);
        v.optional_int("page", 1, 100);

        let err = v.finish().unwrap_err();
        assert!(err.to_user_message().contains("must be an integer"));
    }

    #[test]
    fn test_string_list_bounds() {
        let args = json!({"topics": ["a"]});
        let mut v = Validator::new(&args);
        v.require_string_list("topics", 2, 5);
        assert!(v.finish().is_err());

        let args = json!({"topics": ["a", "b", "c"]});
        let mut v = Validator::new(&args);
        v.require_string_list("topics", 2, 5);
        assert!(v.finish().is_ok());
    }

    #[test]
    fn test_ordered_int_pair() {
        let args = json!({"from_publication_year": 2024, "to_publication_year": 2020});
        let mut v = Validator::new(&args);
        v.ordered_int_pair("from_publication_year", "to_publication_year");
        assert!(v.finish().is_err());
    }

    #[test]
    fn test_non_object_arguments_rejected() {
        let args = json!([1, 2, 3]);
        let v = Validator::new(&args);
        assert!(v.finish().is_err());
    }
}
