use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::vocab::UnknownTerm;

/// Raw values pushed by a form collaborator, keyed by field name.
pub type FormValues = BTreeMap<String, String>;

/// Build a section value from raw form input.
///
/// A single invalid field rejects the whole form: callers either get a
/// complete section or a [`ValidationError`] naming the offending field.
pub trait FromForm: Sized {
    fn from_form(form: &FormValues) -> Result<Self, ValidationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationKind {
    /// Text supplied where a number was expected.
    NotNumeric,
    /// Key outside the section's fixed field set.
    UnknownField,
    /// Categorical value outside its closed vocabulary.
    NotInVocabulary,
    /// An input a rule depends on is missing (e.g. sex for WHR).
    MissingPrecondition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub value: String,
    pub kind: ValidationKind,
    pub message: String,
}

impl ValidationError {
    pub fn not_numeric(field: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            kind: ValidationKind::NotNumeric,
            message: format!("{field}: '{value}' is not a number"),
        }
    }

    pub fn unknown_field(field: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            value: value.to_string(),
            kind: ValidationKind::UnknownField,
            message: format!("unknown field '{field}'"),
        }
    }

    pub fn missing_precondition(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: String::new(),
            kind: ValidationKind::MissingPrecondition,
            message: message.into(),
        }
    }

    fn from_term(field: &str, err: UnknownTerm) -> Self {
        Self {
            field: field.to_string(),
            message: format!("{field}: {err}"),
            value: err.value,
            kind: ValidationKind::NotInVocabulary,
        }
    }
}

/// Trimmed value, or `None` for blank input.
pub fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Parse a numeric field. Accepts a decimal comma ("72,5").
pub fn parse_number(field: &str, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| ValidationError::not_numeric(field, raw))?;
    if !value.is_finite() {
        return Err(ValidationError::not_numeric(field, raw));
    }
    Ok(value)
}

/// Parse a categorical field against its closed vocabulary.
pub fn parse_term<T>(field: &str, raw: &str) -> Result<T, ValidationError>
where
    T: FromStr<Err = UnknownTerm>,
{
    raw.parse().map_err(|e| ValidationError::from_term(field, e))
}

/// Parse an optional categorical field; blank means unset.
pub fn parse_optional_term<T>(field: &str, raw: Option<&String>) -> Result<Option<T>, ValidationError>
where
    T: FromStr<Err = UnknownTerm>,
{
    raw.and_then(|r| non_blank(r))
        .map(|v| parse_term(field, v))
        .transpose()
}
