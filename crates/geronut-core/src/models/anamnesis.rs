use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::map_skip_blank;
use crate::form::{non_blank, parse_term, FormValues, FromForm, ValidationError};
use crate::vocab::AnamnesisField;

/// Narrative history fields. Persisted nested under `paciente.anamnese`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Anamnesis {
    #[serde(deserialize_with = "map_skip_blank")]
    fields: BTreeMap<AnamnesisField, String>,
}

impl Anamnesis {
    pub fn get(&self, field: AnamnesisField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnamnesisField, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromForm for Anamnesis {
    /// Keeps only non-blank answers.
    fn from_form(form: &FormValues) -> Result<Self, ValidationError> {
        let mut fields = BTreeMap::new();
        for (key, raw) in form {
            let field: AnamnesisField = parse_term(key, key)
                .map_err(|_| ValidationError::unknown_field(key, raw))?;
            if let Some(value) = non_blank(raw) {
                fields.insert(field, value.to_string());
            }
        }
        Ok(Self { fields })
    }
}
