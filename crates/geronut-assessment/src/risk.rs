use std::fmt;

use jiff::Zoned;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use geronut_core::PatientRecord;
use geronut_core::models::identity::Identity;
use geronut_core::vocab::Appetite;

use crate::error::AssessmentError;

pub const DEFAULT_ELDER_AGE_THRESHOLD: i16 = 80;

/// More selected conditions than this count as multimorbidity.
pub const MULTIMORBIDITY_MIN_CONDITIONS: usize = 2;

/// Weight loss (%) above which the loss is a risk factor.
pub const RISK_WEIGHT_LOSS_PCT: f64 = 5.0;

const BIRTH_DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];

/// Knobs for the rules whose historical behaviour is questionable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRules {
    /// Treat a missing BMI as 0 when deciding nutritional status.
    pub legacy_bmi_default: bool,
    /// Count any recorded birth date as the advanced-age factor.
    pub legacy_age_factor: bool,
    /// Age (years) above which the patient counts as advanced age.
    pub elder_age_threshold: i16,
    /// Date ages are computed against; today when unset.
    pub reference_date: Option<Date>,
}

impl Default for ClassificationRules {
    fn default() -> Self {
        Self {
            legacy_bmi_default: false,
            legacy_age_factor: false,
            elder_age_threshold: DEFAULT_ELDER_AGE_THRESHOLD,
            reference_date: None,
        }
    }
}

impl ClassificationRules {
    /// Rules that reproduce the behaviour of files produced by the first
    /// release: missing BMI counts as 0, any birth date counts as age.
    pub fn legacy() -> Self {
        Self {
            legacy_bmi_default: true,
            legacy_age_factor: true,
            ..Self::default()
        }
    }

    fn today(&self) -> Date {
        self.reference_date.unwrap_or_else(|| Zoned::now().date())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskFactor {
    AdvancedAge,
    Multimorbidity,
    WeightLoss,
    PoorAppetite,
}

impl RiskFactor {
    pub fn label(self) -> &'static str {
        match self {
            RiskFactor::AdvancedAge => "Idade avançada",
            RiskFactor::Multimorbidity => "Mais de 2 doenças crônicas",
            RiskFactor::WeightLoss => "Perda de peso > 5%",
            RiskFactor::PoorAppetite => "Apetite reduzido",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLevel {
    #[serde(rename = "Baixo Risco")]
    Low,
    #[serde(rename = "Risco Moderado")]
    Moderate,
    #[serde(rename = "Alto Risco")]
    High,
}

impl RiskLevel {
    pub fn from_factor_count(count: usize) -> Self {
        match count {
            0 => RiskLevel::Low,
            1 | 2 => RiskLevel::Moderate,
            _ => RiskLevel::High,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Baixo Risco",
            RiskLevel::Moderate => "Risco Moderado",
            RiskLevel::High => "Alto Risco",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub factors: Vec<RiskFactor>,
}

/// Count the nutritional risk factors present in `record`.
///
/// `weight_loss_pct` is passed in rather than recomputed so callers that
/// already hold the computed metrics don't derive it twice.
pub fn nutritional_risk(
    record: &PatientRecord,
    weight_loss_pct: Option<f64>,
    rules: &ClassificationRules,
) -> RiskAssessment {
    let mut factors = Vec::new();

    if has_advanced_age(&record.identity, rules) {
        factors.push(RiskFactor::AdvancedAge);
    }
    if record.clinical.conditions.len() > MULTIMORBIDITY_MIN_CONDITIONS {
        factors.push(RiskFactor::Multimorbidity);
    }
    if weight_loss_pct.is_some_and(|loss| loss > RISK_WEIGHT_LOSS_PCT) {
        factors.push(RiskFactor::WeightLoss);
    }
    if matches!(
        record.dietary.habits.appetite,
        Some(Appetite::Fair | Appetite::Poor)
    ) {
        factors.push(RiskFactor::PoorAppetite);
    }

    RiskAssessment {
        level: RiskLevel::from_factor_count(factors.len()),
        factors,
    }
}

fn has_advanced_age(identity: &Identity, rules: &ClassificationRules) -> bool {
    if rules.legacy_age_factor {
        return identity.birth_date.is_some();
    }
    match patient_age(identity, rules) {
        Some(age) => age > rules.elder_age_threshold,
        None => false,
    }
}

/// Age in whole years: from the birth date when it parses, otherwise
/// from the free-text `idade` field.
pub fn patient_age(identity: &Identity, rules: &ClassificationRules) -> Option<i16> {
    if let Some(raw) = identity.birth_date.as_deref() {
        match parse_birth_date(raw) {
            Ok(birth) => return Some(age_on(birth, rules.today())),
            Err(err) => tracing::warn!("{err}; falling back to the recorded age"),
        }
    }
    identity
        .age
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i16>().ok())
}

pub fn parse_birth_date(raw: &str) -> Result<Date, AssessmentError> {
    let trimmed = raw.trim();
    BIRTH_DATE_FORMATS
        .iter()
        .find_map(|format| Date::strptime(format, trimmed).ok())
        .ok_or_else(|| AssessmentError::UnreadableBirthDate(raw.to_string()))
}

/// Completed years between `birth` and `today`.
pub fn age_on(birth: Date, today: Date) -> i16 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}
