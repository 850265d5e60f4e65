use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::map_skip_blank;
use crate::form::{non_blank, FormValues, FromForm, ValidationError};
use crate::vocab::EvolutionField;

/// Follow-up snapshot: a reduced set of anthropometric values plus
/// narrative status fields, kept as entered.
///
/// Serializes as a flat mapping, which is also the on-disk shape of an
/// evolution entry file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evolution {
    #[serde(deserialize_with = "map_skip_blank")]
    fields: BTreeMap<EvolutionField, String>,
}

impl Evolution {
    pub fn get(&self, field: EvolutionField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn set(&mut self, field: EvolutionField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn with(mut self, field: EvolutionField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (EvolutionField, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Partial update: fields present in `update` overwrite, all others
    /// are left untouched.
    pub fn merge(&mut self, update: &Evolution) {
        for (field, value) in update.iter() {
            self.set(field, value);
        }
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

impl FromForm for Evolution {
    /// Blank inputs are dropped so that a merge leaves them untouched.
    fn from_form(form: &FormValues) -> Result<Self, ValidationError> {
        let mut evolution = Evolution::default();
        for (key, raw) in form {
            let field: EvolutionField = key
                .parse()
                .map_err(|_| ValidationError::unknown_field(key, raw))?;
            if let Some(value) = non_blank(raw) {
                evolution.set(field, value);
            }
        }
        Ok(evolution)
    }
}
