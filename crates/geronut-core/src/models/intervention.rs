use serde::{Deserialize, Serialize};

use crate::form::{FormValues, FromForm, ValidationError};

/// Nutritional intervention plan. Persisted under `intervencao`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    #[serde(rename = "objetivos", default)]
    pub goals: String,
    #[serde(rename = "dieta", default)]
    pub diet: String,
    #[serde(rename = "suplementacao", default)]
    pub supplementation: String,
    #[serde(rename = "recomendacoes", default)]
    pub recommendations: String,
}

impl Intervention {
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
            && self.diet.is_empty()
            && self.supplementation.is_empty()
            && self.recommendations.is_empty()
    }
}

impl FromForm for Intervention {
    fn from_form(form: &FormValues) -> Result<Self, ValidationError> {
        let mut intervention = Intervention::default();
        for (key, raw) in form {
            let slot = match key.as_str() {
                "objetivos" => &mut intervention.goals,
                "dieta" => &mut intervention.diet,
                "suplementacao" => &mut intervention.supplementation,
                "recomendacoes" => &mut intervention.recommendations,
                _ => return Err(ValidationError::unknown_field(key, raw)),
            };
            *slot = raw.trim().to_string();
        }
        Ok(intervention)
    }
}
