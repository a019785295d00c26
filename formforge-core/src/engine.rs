//! Schema engine: canonical ordering, validation contracts, defaults
//!
//! The validation contract is a small interpreter over a tagged rule type,
//! built once per schema version and reused for every submission against
//! that version.

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::field::{FieldDescriptor, FieldType};
use crate::ValidationError;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Stable ascending sort of fields by their `order` attribute.
///
/// Ties keep their original relative position. Pure and idempotent:
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(fields: &[FieldDescriptor]) -> Vec<FieldDescriptor> {
    let mut sorted = fields.to_vec();
    sorted.sort_by_key(|f| f.order);
    sorted
}

/// Default values for an empty submission: every field id maps to an empty
/// string, regardless of declared type.
pub fn default_values(fields: &[FieldDescriptor]) -> Map<String, Value> {
    fields
        .iter()
        .map(|f| (f.id.clone(), Value::String(String::new())))
        .collect()
}

/// Value rule derived from a field type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleKind {
    /// Any scalar, kept as a string
    Text,
    /// Well-formed email address string
    Email,
    /// Coerced to a numeric value
    Number,
    /// Coerced to a date value
    Date,
}

impl From<FieldType> for RuleKind {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Email => RuleKind::Email,
            FieldType::Number => RuleKind::Number,
            FieldType::Date => RuleKind::Date,
            _ => RuleKind::Text,
        }
    }
}

/// One compiled per-field rule.
#[derive(Clone, Debug)]
struct FieldRule {
    field_id: String,
    label: String,
    kind: RuleKind,
    required: bool,
}

/// Per-submission validation contract for one schema version.
///
/// Rules are evaluated in normalized field order; every failing field
/// contributes an error rather than stopping at the first. Submitted keys
/// with no matching rule are ignored.
pub struct ValidationContract {
    rules: Vec<FieldRule>,
    email_re: Regex,
}

impl ValidationContract {
    /// Derive the contract from a descriptor list.
    ///
    /// Never fails on malformed descriptors; they degrade to text rules.
    pub fn build(fields: &[FieldDescriptor]) -> Self {
        let rules = normalize(fields)
            .into_iter()
            .map(|f| FieldRule {
                field_id: f.id,
                label: f.label,
                kind: RuleKind::from(f.field_type),
                required: f.required,
            })
            .collect();

        Self {
            rules,
            email_re: Regex::new(EMAIL_PATTERN).expect("email pattern is valid"),
        }
    }

    /// Number of fields covered by the contract.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the contract covers no fields.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply the contract to user-submitted values.
    ///
    /// On success returns the accepted payload: known keys only, numbers
    /// coerced to JSON numbers, everything else carried as submitted. On
    /// failure returns every per-field error.
    pub fn validate(
        &self,
        values: &Map<String, Value>,
    ) -> std::result::Result<Map<String, Value>, Vec<ValidationError>> {
        let mut accepted = Map::new();
        let mut errors = Vec::new();

        for rule in &self.rules {
            let value = values.get(&rule.field_id);
            if is_absent(value) {
                if rule.required {
                    errors.push(ValidationError::required(&rule.field_id, &rule.label));
                }
                continue;
            }
            match self.apply_rule(rule, value.cloned().unwrap_or(Value::Null)) {
                Ok(value) => {
                    accepted.insert(rule.field_id.clone(), value);
                }
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(accepted)
        } else {
            Err(errors)
        }
    }

    fn apply_rule(&self, rule: &FieldRule, value: Value) -> std::result::Result<Value, ValidationError> {
        match rule.kind {
            RuleKind::Text => Ok(coerce_string(value)),
            RuleKind::Email => match &value {
                Value::String(s) if self.email_re.is_match(s) => Ok(value),
                _ => Err(ValidationError::new(
                    &rule.field_id,
                    "Invalid email address.",
                )),
            },
            RuleKind::Number => coerce_number(&value).ok_or_else(|| {
                ValidationError::new(&rule.field_id, format!("{} must be a number.", rule.label))
            }),
            RuleKind::Date => match &value {
                Value::String(s) if is_date(s) => Ok(value),
                _ => Err(ValidationError::new(
                    &rule.field_id,
                    format!("{} must be a valid date.", rule.label),
                )),
            },
        }
    }
}

/// Absent means missing, null, or the empty string (the all-defaults state
/// of an untouched form).
fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn coerce_string(value: Value) -> Value {
    match value {
        Value::String(_) => value,
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Number(n) => Value::String(n.to_string()),
        other => other,
    }
}

fn coerce_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) => {
            let parsed: f64 = s.trim().parse().ok()?;
            Number::from_f64(parsed).map(Value::Number)
        }
        _ => None,
    }
}

fn is_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}
