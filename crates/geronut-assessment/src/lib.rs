//! geronut-assessment
//!
//! Pure calculations over a patient record.
//! Computes anthropometric metrics, classifies them with elderly-specific
//! cutoffs, scores nutritional risk and assembles the dashboard view.

pub mod anthropometry;
pub mod classification;
pub mod dashboard;
pub mod error;
pub mod risk;

pub use anthropometry::{calculate, compute, compute_form, Calculation, ComputedMetrics};
pub use classification::{BmiClass, NutritionalStatus, WhrRisk};
pub use dashboard::{Dashboard, Reading};
pub use error::AssessmentError;
pub use risk::{ClassificationRules, RiskAssessment, RiskFactor, RiskLevel};
