use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use geronut_core::ValidationError;
use geronut_core::vocab::Sex;

use crate::risk::ClassificationRules;

/// Elderly BMI cutoffs (kg/m²): adequate range is closed on both ends.
pub const BMI_ADEQUATE_MIN: f64 = 22.0;
pub const BMI_ADEQUATE_MAX: f64 = 27.0;

/// Highest waist-hip ratio still classed as low risk.
pub const WHR_LOW_RISK_MAX_MALE: f64 = 0.95;
pub const WHR_LOW_RISK_MAX_FEMALE: f64 = 0.80;

/// Weight loss (%) above which the patient is considered malnourished.
pub const MALNUTRITION_WEIGHT_LOSS_PCT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BmiClass {
    #[serde(rename = "Baixo peso")]
    Underweight,
    #[serde(rename = "Adequado")]
    Adequate,
    #[serde(rename = "Sobrepeso")]
    Overweight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum WhrRisk {
    #[serde(rename = "Baixo risco")]
    Low,
    #[serde(rename = "Alto risco")]
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum NutritionalStatus {
    #[serde(rename = "Desnutrição")]
    Malnutrition,
    #[serde(rename = "Sobrepeso")]
    Overweight,
    #[serde(rename = "Adequado")]
    Adequate,
}

impl BmiClass {
    pub fn label(self) -> &'static str {
        match self {
            BmiClass::Underweight => "Baixo peso",
            BmiClass::Adequate => "Adequado",
            BmiClass::Overweight => "Sobrepeso",
        }
    }
}

impl WhrRisk {
    pub fn label(self) -> &'static str {
        match self {
            WhrRisk::Low => "Baixo risco",
            WhrRisk::High => "Alto risco",
        }
    }
}

impl NutritionalStatus {
    pub fn label(self) -> &'static str {
        match self {
            NutritionalStatus::Malnutrition => "Desnutrição",
            NutritionalStatus::Overweight => "Sobrepeso",
            NutritionalStatus::Adequate => "Adequado",
        }
    }
}

impl fmt::Display for BmiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for WhrRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for NutritionalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn classify_bmi(bmi: f64) -> BmiClass {
    if bmi < BMI_ADEQUATE_MIN {
        BmiClass::Underweight
    } else if bmi <= BMI_ADEQUATE_MAX {
        BmiClass::Adequate
    } else {
        BmiClass::Overweight
    }
}

/// Sex-dependent waist-hip ratio risk. Without a recorded sex the class
/// is undefined; there is no default.
pub fn classify_whr(whr: f64, sex: Option<Sex>) -> Result<WhrRisk, ValidationError> {
    let limit = match sex {
        Some(Sex::Male) => WHR_LOW_RISK_MAX_MALE,
        Some(Sex::Female) => WHR_LOW_RISK_MAX_FEMALE,
        None => {
            return Err(ValidationError::missing_precondition(
                "sexo",
                "waist-hip ratio classification requires the patient's sex",
            ));
        }
    };
    Ok(if whr <= limit { WhrRisk::Low } else { WhrRisk::High })
}

/// Nutritional status from BMI and weight trend.
///
/// Weight loss above 10% decides malnutrition on its own. Otherwise a
/// missing BMI yields `None`, unless `rules.legacy_bmi_default` is set, in
/// which case it counts as 0 (and therefore as malnutrition).
pub fn nutritional_status(
    bmi: Option<f64>,
    weight_loss_pct: Option<f64>,
    rules: &ClassificationRules,
) -> Option<NutritionalStatus> {
    let weight_loss = weight_loss_pct.unwrap_or(0.0);
    if weight_loss > MALNUTRITION_WEIGHT_LOSS_PCT {
        return Some(NutritionalStatus::Malnutrition);
    }

    let bmi = match bmi {
        Some(bmi) => bmi,
        None if rules.legacy_bmi_default => 0.0,
        None => return None,
    };

    Some(if bmi < BMI_ADEQUATE_MIN {
        NutritionalStatus::Malnutrition
    } else if bmi > BMI_ADEQUATE_MAX {
        NutritionalStatus::Overweight
    } else {
        NutritionalStatus::Adequate
    })
}
