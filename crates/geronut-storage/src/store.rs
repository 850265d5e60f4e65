use std::path::{Path, PathBuf};

use jiff::Timestamp;
use jiff::tz::TimeZone;

use geronut_core::PatientRecord;
use geronut_core::file_names::{self, EVOLUTIONS_DIR, SNAPSHOTS_DIR};
use geronut_core::models::evolution::Evolution;

use crate::error::StorageError;
use crate::evolution::{self, EvolutionEntry};
use crate::snapshot::{self, LoadedSnapshot};

/// Data directory holding one snapshot per patient and the evolution
/// entry area:
///
/// ```text
/// <root>/pacientes/avaliacao_<name>.json
/// <root>/evolucoes/evolucao_<name>_<YYYYMMDD_HHMMSS>.json
/// ```
#[derive(Debug, Clone)]
pub struct PatientStore {
    root: PathBuf,
    time_zone: TimeZone,
}

impl PatientStore {
    /// Evolution stamps use the system time zone.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_time_zone(root, TimeZone::system())
    }

    pub fn with_time_zone(root: impl Into<PathBuf>, time_zone: TimeZone) -> Self {
        Self {
            root: root.into(),
            time_zone,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    pub fn snapshot_path(&self, patient: &str) -> PathBuf {
        self.root.join(SNAPSHOTS_DIR).join(file_names::snapshot_file_name(patient))
    }

    pub fn evolutions_dir(&self) -> PathBuf {
        self.root.join(EVOLUTIONS_DIR)
    }

    /// A `.json` argument is taken as a path; anything else as a patient
    /// name.
    pub fn resolve(&self, name_or_path: &str) -> PathBuf {
        let candidate = Path::new(name_or_path);
        if candidate.extension().is_some_and(|ext| ext == "json") {
            candidate.to_path_buf()
        } else {
            self.snapshot_path(name_or_path)
        }
    }

    /// Overwrite the patient's snapshot. Returns the file written.
    pub fn save(&self, record: &PatientRecord, saved_at: Timestamp) -> Result<PathBuf, StorageError> {
        let path = self.snapshot_path(record.patient_name());
        snapshot::write(&path, record, saved_at)?;
        tracing::info!(path = %path.display(), "snapshot saved");
        Ok(path)
    }

    pub fn load(&self, name_or_path: &str) -> Result<LoadedSnapshot, StorageError> {
        let path = self.resolve(name_or_path);
        let loaded = snapshot::read(&path)?;
        tracing::info!(path = %path.display(), "snapshot loaded");
        Ok(loaded)
    }

    /// Names of the saved snapshot files.
    pub fn list_snapshots(&self) -> Result<Vec<String>, StorageError> {
        let names = crate::fs::list_file_names(&self.root.join(SNAPSHOTS_DIR))?;
        Ok(names.into_iter().filter(|n| n.ends_with(".json")).collect())
    }

    pub fn append_evolution(&self, patient: &str, evolution: &Evolution, at: Timestamp) -> Result<EvolutionEntry, StorageError> {
        let recorded_at = at.to_zoned(self.time_zone.clone()).datetime();
        evolution::write(&self.evolutions_dir(), patient, recorded_at, evolution)
    }

    pub fn list_evolutions(&self, patient: &str) -> Result<Vec<EvolutionEntry>, StorageError> {
        evolution::list(&self.evolutions_dir(), patient)
    }

    /// A `.json` argument is taken as a path, otherwise as the stamp of
    /// one of `patient`'s entries.
    pub fn evolution_path(&self, patient: &str, stamp_or_path: &str) -> PathBuf {
        let candidate = Path::new(stamp_or_path);
        if candidate.extension().is_some_and(|ext| ext == "json") {
            candidate.to_path_buf()
        } else {
            self.evolutions_dir()
                .join(file_names::evolution_file_name(patient, stamp_or_path))
        }
    }

    pub fn read_evolution(&self, path: &Path) -> Result<Evolution, StorageError> {
        evolution::read(path)
    }
}
