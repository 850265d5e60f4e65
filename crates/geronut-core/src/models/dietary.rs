use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{blank_as_none, map_skip_blank};
use crate::form::{non_blank, parse_optional_term, parse_term, FormValues, FromForm, ValidationError};
use crate::vocab::{Appetite, Bowel, Chewing, FoodGroup, Frequency, Meal, Supplementation, Swallowing};

/// Form key prefix for the 24-hour recall, e.g. `recordatorio.almoco`.
pub const RECALL_PREFIX: &str = "recordatorio.";
/// Form key prefix for food frequency, e.g. `frequencia.frutas`.
pub const FREQUENCY_PREFIX: &str = "frequencia.";

/// Dietary assessment. Persisted under `alimentares`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dietary {
    #[serde(rename = "recordatorio", default, deserialize_with = "map_skip_blank")]
    pub recall: BTreeMap<Meal, String>,
    #[serde(rename = "frequencia", default, deserialize_with = "map_skip_blank")]
    pub frequency: BTreeMap<FoodGroup, Frequency>,
    #[serde(rename = "habitos", default)]
    pub habits: EatingHabits,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EatingHabits {
    #[serde(rename = "apetite", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub appetite: Option<Appetite>,
    #[serde(rename = "mastigacao", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub chewing: Option<Chewing>,
    #[serde(rename = "degluticao", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub swallowing: Option<Swallowing>,
    #[serde(rename = "intestino", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub bowel: Option<Bowel>,
    /// Litres per day, free text.
    #[serde(rename = "agua", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub water_intake: Option<String>,
    #[serde(rename = "suplementacao", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub supplementation: Option<Supplementation>,
}

impl FromForm for Dietary {
    fn from_form(form: &FormValues) -> Result<Self, ValidationError> {
        let mut dietary = Dietary {
            habits: EatingHabits {
                appetite: parse_optional_term("apetite", form.get("apetite"))?,
                chewing: parse_optional_term("mastigacao", form.get("mastigacao"))?,
                swallowing: parse_optional_term("degluticao", form.get("degluticao"))?,
                bowel: parse_optional_term("intestino", form.get("intestino"))?,
                water_intake: form.get("agua").and_then(|v| non_blank(v)).map(str::to_string),
                supplementation: parse_optional_term("suplementacao", form.get("suplementacao"))?,
            },
            ..Dietary::default()
        };

        for (key, raw) in form {
            if let Some(meal) = key.strip_prefix(RECALL_PREFIX) {
                let meal: Meal =
                    parse_term(key, meal).map_err(|_| ValidationError::unknown_field(key, raw))?;
                if let Some(text) = non_blank(raw) {
                    dietary.recall.insert(meal, text.to_string());
                }
            } else if let Some(group) = key.strip_prefix(FREQUENCY_PREFIX) {
                let group: FoodGroup =
                    parse_term(key, group).map_err(|_| ValidationError::unknown_field(key, raw))?;
                if let Some(value) = non_blank(raw) {
                    dietary.frequency.insert(group, parse_term(key, value)?);
                }
            } else if !matches!(
                key.as_str(),
                "apetite" | "mastigacao" | "degluticao" | "intestino" | "agua" | "suplementacao"
            ) {
                return Err(ValidationError::unknown_field(key, raw));
            }
        }

        Ok(dietary)
    }
}
