use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::form::{non_blank, parse_number, FormValues, FromForm, ValidationError};
use crate::vocab::AnthropometricField;

/// Key of the free-text measurement date.
pub const MEASURED_ON_KEY: &str = "data_medicao";

/// Raw anthropometric measurements, as entered. Persisted under
/// `antropometricos`.
///
/// Derived metrics (BMI, WHR, ...) are never stored here; they are
/// recomputed from these values whenever they are needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurements {
    values: BTreeMap<AnthropometricField, f64>,
    measured_on: Option<String>,
}

impl Measurements {
    pub fn get(&self, field: AnthropometricField) -> Option<f64> {
        self.values.get(&field).copied()
    }

    pub fn set(&mut self, field: AnthropometricField, value: f64) {
        self.values.insert(field, value);
    }

    pub fn with(mut self, field: AnthropometricField, value: f64) -> Self {
        self.set(field, value);
        self
    }

    pub fn measured_on(&self) -> Option<&str> {
        self.measured_on.as_deref()
    }

    pub fn set_measured_on(&mut self, date: impl Into<String>) {
        self.measured_on = Some(date.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnthropometricField, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.measured_on.is_none()
    }

    /// Overlay every value present in `update`; fields it lacks keep
    /// their current value.
    pub fn merge(&mut self, update: &Measurements) {
        self.values.extend(update.iter());
        if let Some(date) = &update.measured_on {
            self.measured_on = Some(date.clone());
        }
    }
}

impl FromForm for Measurements {
    fn from_form(form: &FormValues) -> Result<Self, ValidationError> {
        let mut measurements = Measurements::default();
        for (key, raw) in form {
            if key == MEASURED_ON_KEY {
                measurements.measured_on = non_blank(raw).map(str::to_string);
                continue;
            }
            let field: AnthropometricField = key
                .parse()
                .map_err(|_| ValidationError::unknown_field(key, raw))?;
            if non_blank(raw).is_some() {
                measurements.set(field, parse_number(field.key(), raw)?);
            }
        }
        Ok(measurements)
    }
}

impl Serialize for Measurements {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.values.len() + usize::from(self.measured_on.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (field, value) in &self.values {
            map.serialize_entry(field.key(), value)?;
        }
        if let Some(date) = &self.measured_on {
            map.serialize_entry(MEASURED_ON_KEY, date)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Measurements {
    /// Tolerates the computed keys and blank strings older files carry
    /// alongside the raw values; a non-numeric measurement is an error.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut measurements = Measurements::default();

        for (key, value) in raw {
            if key == MEASURED_ON_KEY {
                measurements.measured_on = match value {
                    serde_json::Value::String(s) => non_blank(&s).map(str::to_string),
                    serde_json::Value::Null => None,
                    other => Some(other.to_string()),
                };
                continue;
            }
            let Ok(field) = key.parse::<AnthropometricField>() else {
                continue;
            };
            let number = match &value {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) if non_blank(s).is_none() => None,
                serde_json::Value::String(s) => {
                    Some(parse_number(field.key(), s).map_err(D::Error::custom)?)
                }
                serde_json::Value::Null => None,
                other => {
                    return Err(D::Error::custom(format!(
                        "{}: expected a number, found {other}",
                        field.key()
                    )));
                }
            };
            if let Some(number) = number {
                measurements.set(field, number);
            }
        }

        Ok(measurements)
    }
}
