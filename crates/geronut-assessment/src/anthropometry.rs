use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use geronut_core::form::{FormValues, FromForm, ValidationError};
use geronut_core::models::anthropometry::Measurements;
use geronut_core::vocab::{AnthropometricField, Sex};

use crate::classification::{classify_bmi, classify_whr, BmiClass, WhrRisk};
use crate::error::AssessmentError;

/// Body mass index from weight (kg) and height (m).
pub fn bmi(weight_kg: f64, height_m: f64) -> Option<f64> {
    (height_m > 0.0).then(|| weight_kg / (height_m * height_m))
}

/// Waist-hip ratio.
pub fn whr(waist_cm: f64, hip_cm: f64) -> Option<f64> {
    (waist_cm > 0.0 && hip_cm > 0.0).then(|| waist_cm / hip_cm)
}

/// Percentage of habitual weight lost. Negative when the patient gained.
pub fn weight_loss_pct(habitual_kg: f64, current_kg: f64) -> Option<f64> {
    (habitual_kg > 0.0).then(|| (habitual_kg - current_kg) / habitual_kg * 100.0)
}

/// Mid-arm muscle circumference (cm). The triceps skinfold is in mm.
pub fn mamc(arm_cm: f64, triceps_mm: f64) -> Option<f64> {
    (arm_cm > 0.0 && triceps_mm > 0.0).then(|| arm_cm - PI * (triceps_mm / 10.0))
}

/// Arm muscle area (cm²) from the mid-arm muscle circumference.
pub fn ama(mamc_cm: f64) -> f64 {
    mamc_cm * mamc_cm / (4.0 * PI)
}

/// Metrics derived from one set of measurements. A metric whose inputs
/// are missing, or whose divisor is not positive, is absent rather
/// than zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ComputedMetrics {
    #[serde(rename = "imc", skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(rename = "classificacao_imc", skip_serializing_if = "Option::is_none")]
    pub bmi_class: Option<BmiClass>,
    #[serde(rename = "rcq", skip_serializing_if = "Option::is_none")]
    pub whr: Option<f64>,
    #[serde(rename = "classificacao_rcq", skip_serializing_if = "Option::is_none")]
    pub whr_class: Option<WhrRisk>,
    #[serde(rename = "perda_peso_perc", skip_serializing_if = "Option::is_none")]
    pub weight_loss_pct: Option<f64>,
    #[serde(rename = "cmb", skip_serializing_if = "Option::is_none")]
    pub mamc: Option<f64>,
    #[serde(rename = "amb", skip_serializing_if = "Option::is_none")]
    pub ama: Option<f64>,
}

impl ComputedMetrics {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn positive(measurements: &Measurements, field: AnthropometricField) -> Option<f64> {
    measurements.get(field).filter(|v| *v > 0.0)
}

/// Metrics computed from raw input, plus the field-scoped messages for
/// classifications that could not be made.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct Calculation {
    #[serde(flatten)]
    pub metrics: ComputedMetrics,
    #[serde(rename = "avisos", skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ValidationError>,
}

/// Compute every derivable metric. Height is stored in centimetres.
///
/// The WHR class needs the patient's sex; without it the ratio is still
/// reported but left unclassified.
pub fn compute(measurements: &Measurements, sex: Option<Sex>) -> ComputedMetrics {
    let Calculation { metrics, warnings } = calculate(measurements, sex);
    for warning in &warnings {
        tracing::warn!(field = %warning.field, "{warning}");
    }
    metrics
}

/// Like [`compute`], but hands back the precondition failures instead of
/// logging them.
pub fn calculate(measurements: &Measurements, sex: Option<Sex>) -> Calculation {
    use AnthropometricField as F;

    let weight = measurements.get(F::CurrentWeight);
    let height_m = positive(measurements, F::Height).map(|cm| cm / 100.0);

    let bmi = weight.zip(height_m).and_then(|(w, h)| bmi(w, h));
    let whr = positive(measurements, F::WaistCircumference)
        .zip(positive(measurements, F::HipCircumference))
        .and_then(|(waist, hip)| whr(waist, hip));
    let weight_loss_pct = positive(measurements, F::HabitualWeight)
        .zip(weight)
        .and_then(|(habitual, current)| weight_loss_pct(habitual, current));
    let mamc = positive(measurements, F::ArmCircumference)
        .zip(positive(measurements, F::TricepsSkinfold))
        .and_then(|(arm, triceps)| mamc(arm, triceps));

    let mut warnings = Vec::new();
    let whr_class = whr.and_then(|ratio| {
        classify_whr(ratio, sex)
            .inspect_err(|err| warnings.push(err.clone()))
            .ok()
    });

    let metrics = ComputedMetrics {
        bmi,
        bmi_class: bmi.map(classify_bmi),
        whr,
        whr_class,
        weight_loss_pct,
        mamc,
        ama: mamc.map(ama),
    };
    Calculation { metrics, warnings }
}

/// Stateless calculation straight from raw form values. Nothing is stored.
pub fn compute_form(form: &FormValues, sex: Option<Sex>) -> Result<Calculation, AssessmentError> {
    let measurements = Measurements::from_form(form)?;
    Ok(calculate(&measurements, sex))
}
