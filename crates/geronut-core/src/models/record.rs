use jiff::Timestamp;

use super::anamnesis::Anamnesis;
use super::anthropometry::Measurements;
use super::clinical::Clinical;
use super::dietary::Dietary;
use super::evolution::Evolution;
use super::history::{ConsultationEntry, ConsultationHistory};
use super::identity::Identity;
use super::intervention::Intervention;
use crate::vocab::AnthropometricField;

/// Everything recorded for one patient during a session.
///
/// Sections are mutated through their save operations. The consultation
/// history is only reachable through [`PatientRecord::save_anthropometrics`],
/// which appends; it is never edited or truncated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientRecord {
    pub identity: Identity,
    pub anamnesis: Anamnesis,
    pub anthropometrics: Measurements,
    pub clinical: Clinical,
    pub dietary: Dietary,
    pub intervention: Intervention,
    pub evolution: Evolution,
    history: ConsultationHistory,
}

impl PatientRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a record around a previously persisted history.
    pub fn with_history(history: ConsultationHistory) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    pub fn history(&self) -> &ConsultationHistory {
        &self.history
    }

    pub fn patient_name(&self) -> &str {
        self.identity.display_name()
    }

    /// Replace identity and stamp the registration time.
    pub fn save_identity(&mut self, mut identity: Identity, at: Timestamp) {
        identity.registered_at = Some(at.to_string());
        self.identity = identity;
    }

    pub fn save_anamnesis(&mut self, anamnesis: Anamnesis) {
        self.anamnesis = anamnesis;
    }

    /// Merge new measurements over the current ones and append one
    /// history entry carrying the resulting current weight.
    pub fn save_anthropometrics(&mut self, update: &Measurements, at: Timestamp) -> &ConsultationEntry {
        self.anthropometrics.merge(update);
        let weight = self.anthropometrics.get(AnthropometricField::CurrentWeight);
        self.history.push(at, weight)
    }

    /// Conditions and medications are replaced; lab values are merged.
    pub fn save_clinical(&mut self, update: Clinical) {
        self.clinical.conditions = update.conditions;
        self.clinical.medications = update.medications;
        self.clinical.labs.merge(&update.labs);
    }

    pub fn save_dietary(&mut self, dietary: Dietary) {
        self.dietary = dietary;
    }

    pub fn save_intervention(&mut self, intervention: Intervention) {
        self.intervention = intervention;
    }
}
