use std::fmt;

use jiff::Timestamp;
use serde::{Serialize, Serializer};

use geronut_core::PatientRecord;

use crate::anthropometry::compute;
use crate::classification::{nutritional_status, BmiClass, NutritionalStatus, WhrRisk};
use crate::risk::{nutritional_risk, ClassificationRules, RiskFactor, RiskLevel};

/// Placeholder rendered wherever a value could not be derived.
pub const NO_DATA: &str = "--";

/// A dashboard value, or the "no data" sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading<T> {
    Value(T),
    NoData,
}

impl<T> Reading<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Reading::Value(v) => Some(v),
            Reading::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Reading::NoData)
    }
}

impl<T> From<Option<T>> for Reading<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Reading::NoData, Reading::Value)
    }
}

impl<T: Serialize> Serialize for Reading<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Value(v) => v.serialize(serializer),
            Reading::NoData => serializer.serialize_str(NO_DATA),
        }
    }
}

impl fmt::Display for Reading<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Value(v) => write!(f, "{v:.2}"),
            Reading::NoData => f.write_str(NO_DATA),
        }
    }
}

macro_rules! display_label_reading {
    ($($ty:ty),+) => {
        $(impl fmt::Display for Reading<$ty> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    Reading::Value(v) => f.write_str(v.label()),
                    Reading::NoData => f.write_str(NO_DATA),
                }
            }
        })+
    };
}

display_label_reading!(BmiClass, WhrRisk, NutritionalStatus, RiskLevel);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightPoint {
    #[serde(rename = "data")]
    pub at: Timestamp,
    #[serde(rename = "peso")]
    pub weight_kg: Reading<f64>,
}

/// Read-only summary of a record. Built fresh on every call; nothing here
/// is cached or written back into the record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    #[serde(rename = "imc")]
    pub bmi: Reading<f64>,
    #[serde(rename = "classificacao_imc")]
    pub bmi_class: Reading<BmiClass>,
    #[serde(rename = "rcq")]
    pub whr: Reading<f64>,
    #[serde(rename = "classificacao_rcq")]
    pub whr_class: Reading<WhrRisk>,
    #[serde(rename = "perda_peso_perc")]
    pub weight_loss_pct: Reading<f64>,
    #[serde(rename = "estado_nutricional")]
    pub nutritional_status: Reading<NutritionalStatus>,
    #[serde(rename = "risco_nutricional")]
    pub nutritional_risk: RiskLevel,
    #[serde(rename = "fatores_risco")]
    pub risk_factors: Vec<RiskFactor>,
    #[serde(rename = "evolucao_peso")]
    pub weight_series: Vec<WeightPoint>,
}

impl Dashboard {
    pub fn build(record: &PatientRecord, rules: &ClassificationRules) -> Self {
        let metrics = compute(&record.anthropometrics, record.identity.sex);
        let status = nutritional_status(metrics.bmi, metrics.weight_loss_pct, rules);
        let risk = nutritional_risk(record, metrics.weight_loss_pct, rules);

        let weight_series = record
            .history()
            .entries()
            .iter()
            .map(|entry| WeightPoint {
                at: entry.at,
                weight_kg: entry.weight_kg.into(),
            })
            .collect();

        Dashboard {
            bmi: metrics.bmi.into(),
            bmi_class: metrics.bmi_class.into(),
            whr: metrics.whr.into(),
            whr_class: metrics.whr_class.into(),
            weight_loss_pct: metrics.weight_loss_pct.into(),
            nutritional_status: status.into(),
            nutritional_risk: risk.level,
            risk_factors: risk.factors,
            weight_series,
        }
    }
}
