use std::path::{Path, PathBuf};

use jiff::Timestamp;

use geronut_assessment::{ClassificationRules, Dashboard};
use geronut_core::form::{FormValues, FromForm};
use geronut_core::models::anamnesis::Anamnesis;
use geronut_core::models::anthropometry::Measurements;
use geronut_core::models::clinical::Clinical;
use geronut_core::models::dietary::Dietary;
use geronut_core::models::evolution::Evolution;
use geronut_core::models::history::ConsultationEntry;
use geronut_core::models::identity::Identity;
use geronut_core::models::intervention::Intervention;
use geronut_core::PatientRecord;

use crate::error::{SessionError, StorageError};
use crate::evolution::EvolutionEntry;
use crate::store::PatientStore;

/// The record being edited plus the store it is saved to.
///
/// Every section save rebuilds its section from form input and then
/// writes the whole snapshot. A form that fails validation changes
/// nothing.
#[derive(Debug)]
pub struct Session {
    store: PatientStore,
    rules: ClassificationRules,
    record: PatientRecord,
    saved_at: Option<Timestamp>,
}

impl Session {
    pub fn new(store: PatientStore, rules: ClassificationRules) -> Self {
        Self {
            store,
            rules,
            record: PatientRecord::new(),
            saved_at: None,
        }
    }

    /// A fresh record already carrying the patient's name, so that
    /// sections saved before identity land in the right file.
    pub fn for_patient(store: PatientStore, rules: ClassificationRules, name: &str) -> Self {
        let mut session = Self::new(store, rules);
        session.record.identity.name = Some(name.to_string());
        session
    }

    /// Start a session on a previously saved snapshot.
    pub fn open(store: PatientStore, rules: ClassificationRules, name_or_path: &str) -> Result<Self, StorageError> {
        let mut session = Self::new(store, rules);
        session.load(name_or_path)?;
        Ok(session)
    }

    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    pub fn store(&self) -> &PatientStore {
        &self.store
    }

    pub fn rules(&self) -> &ClassificationRules {
        &self.rules
    }

    pub fn saved_at(&self) -> Option<Timestamp> {
        self.saved_at
    }

    pub fn save_identity(&mut self, form: &FormValues) -> Result<PathBuf, SessionError> {
        let identity = Identity::from_form(form)?;
        let now = Timestamp::now();
        self.record.save_identity(identity, now);
        Ok(self.save_at(now)?)
    }

    pub fn save_anamnesis(&mut self, form: &FormValues) -> Result<PathBuf, SessionError> {
        let anamnesis = Anamnesis::from_form(form)?;
        self.record.save_anamnesis(anamnesis);
        Ok(self.save()?)
    }

    pub fn save_anthropometrics(&mut self, form: &FormValues) -> Result<ConsultationEntry, SessionError> {
        self.save_anthropometrics_at(form, Timestamp::now())
    }

    /// Merge the measurements, append one history entry stamped `at`
    /// and save.
    pub fn save_anthropometrics_at(&mut self, form: &FormValues, at: Timestamp) -> Result<ConsultationEntry, SessionError> {
        let update = Measurements::from_form(form)?;
        let entry = self.record.save_anthropometrics(&update, at).clone();
        self.save_at(at)?;
        Ok(entry)
    }

    pub fn save_clinical(&mut self, form: &FormValues) -> Result<PathBuf, SessionError> {
        let clinical = Clinical::from_form(form)?;
        self.record.save_clinical(clinical);
        Ok(self.save()?)
    }

    pub fn save_dietary(&mut self, form: &FormValues) -> Result<PathBuf, SessionError> {
        let dietary = Dietary::from_form(form)?;
        self.record.save_dietary(dietary);
        Ok(self.save()?)
    }

    pub fn save_intervention(&mut self, form: &FormValues) -> Result<PathBuf, SessionError> {
        let intervention = Intervention::from_form(form)?;
        self.record.save_intervention(intervention);
        Ok(self.save()?)
    }

    pub fn save(&mut self) -> Result<PathBuf, StorageError> {
        self.save_at(Timestamp::now())
    }

    fn save_at(&mut self, at: Timestamp) -> Result<PathBuf, StorageError> {
        let path = self.store.save(&self.record, at)?;
        self.saved_at = Some(at);
        Ok(path)
    }

    /// Replace the whole record with a saved snapshot. On any error the
    /// current record is left as it was.
    pub fn load(&mut self, name_or_path: &str) -> Result<(), StorageError> {
        let loaded = self.store.load(name_or_path)?;
        self.record = loaded.record;
        self.saved_at = loaded.saved_at;
        Ok(())
    }

    pub fn record_evolution(&mut self, form: &FormValues) -> Result<EvolutionEntry, SessionError> {
        self.record_evolution_at(form, Timestamp::now())
    }

    /// Merge the non-blank fields into the active evolution, save the
    /// snapshot, then write a new entry holding the merged mapping.
    /// Identical saves still produce separate entries.
    pub fn record_evolution_at(&mut self, form: &FormValues, at: Timestamp) -> Result<EvolutionEntry, SessionError> {
        let update = Evolution::from_form(form)?;
        self.record.evolution.merge(&update);
        self.save_at(at)?;
        let entry = self
            .store
            .append_evolution(self.record.patient_name(), &self.record.evolution, at)?;
        Ok(entry)
    }

    /// Clear the active evolution. Entry files already written stay.
    pub fn reset_evolution(&mut self) {
        self.record.evolution.clear();
    }

    /// Replace the active evolution with the contents of an entry file.
    pub fn load_evolution(&mut self, path: &Path) -> Result<(), StorageError> {
        self.record.evolution = self.store.read_evolution(path)?;
        Ok(())
    }

    pub fn evolution_entries(&self) -> Result<Vec<EvolutionEntry>, StorageError> {
        self.store.list_evolutions(self.record.patient_name())
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::build(&self.record, &self.rules)
    }
}
