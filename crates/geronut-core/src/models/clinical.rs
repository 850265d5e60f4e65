use std::collections::{BTreeMap, BTreeSet};

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::form::{non_blank, parse_term, FormValues, FromForm, ValidationError};
use crate::vocab::{ChronicCondition, LabTest};

/// Form key holding the selected conditions, separated by `;`.
pub const CONDITIONS_KEY: &str = "doencas";
pub const MEDICATIONS_KEY: &str = "medicamentos";

/// Clinical assessment. Persisted under `clinicos`, with lab values
/// stored flat next to `doencas` and `medicamentos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clinical {
    #[serde(rename = "doencas", default)]
    pub conditions: BTreeSet<ChronicCondition>,
    #[serde(rename = "medicamentos", default)]
    pub medications: String,
    #[serde(flatten)]
    pub labs: LabPanel,
}

/// Laboratory results, kept as entered (units vary per test).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabPanel {
    values: BTreeMap<LabTest, String>,
}

impl LabPanel {
    pub fn get(&self, test: LabTest) -> Option<&str> {
        self.values.get(&test).map(String::as_str)
    }

    pub fn set(&mut self, test: LabTest, value: impl Into<String>) {
        self.values.insert(test, value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (LabTest, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay the results present in `update`.
    pub fn merge(&mut self, update: &LabPanel) {
        for (test, value) in update.iter() {
            self.set(test, value);
        }
    }
}

impl Serialize for LabPanel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (test, value) in &self.values {
            map.serialize_entry(test.key(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabPanel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut panel = LabPanel::default();
        for (key, value) in raw {
            let Ok(test) = key.parse::<LabTest>() else {
                continue;
            };
            match value {
                serde_json::Value::String(s) => {
                    if let Some(v) = non_blank(&s) {
                        panel.set(test, v);
                    }
                }
                serde_json::Value::Number(n) => panel.set(test, n.to_string()),
                _ => {}
            }
        }
        Ok(panel)
    }
}

impl FromForm for Clinical {
    fn from_form(form: &FormValues) -> Result<Self, ValidationError> {
        let mut clinical = Clinical::default();
        for (key, raw) in form {
            match key.as_str() {
                CONDITIONS_KEY => {
                    for label in raw.split(';').filter_map(non_blank) {
                        clinical.conditions.insert(parse_term(CONDITIONS_KEY, label)?);
                    }
                }
                MEDICATIONS_KEY => clinical.medications = raw.trim().to_string(),
                _ => {
                    let test: LabTest = key
                        .parse()
                        .map_err(|_| ValidationError::unknown_field(key, raw))?;
                    if let Some(value) = non_blank(raw) {
                        clinical.labs.set(test, value);
                    }
                }
            }
        }
        Ok(clinical)
    }
}
