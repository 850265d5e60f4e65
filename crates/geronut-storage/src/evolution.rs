use std::path::{Path, PathBuf};

use jiff::civil::DateTime;

use geronut_core::file_names::{self, EVOLUTION_STAMP_FORMAT};
use geronut_core::models::evolution::Evolution;

use crate::error::StorageError;
use crate::fs;

/// A follow-up entry file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionEntry {
    pub path: PathBuf,
    /// `YYYYMMDD_HHMMSS` suffix of the file name.
    pub stamp: String,
    /// Wall-clock time the stamp encodes, in the store's time zone.
    pub recorded_at: DateTime,
}

impl EvolutionEntry {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

/// Write `evolution` as a flat mapping. An entry with the same stamp is
/// overwritten.
pub fn write(dir: &Path, patient: &str, recorded_at: DateTime, evolution: &Evolution) -> Result<EvolutionEntry, StorageError> {
    let stamp = recorded_at.strftime(EVOLUTION_STAMP_FORMAT).to_string();
    let path = dir.join(file_names::evolution_file_name(patient, &stamp));
    fs::write_json(&path, evolution)?;
    tracing::info!(path = %path.display(), fields = evolution.len(), "evolution entry written");
    Ok(EvolutionEntry {
        path,
        stamp,
        recorded_at,
    })
}

/// Entries belonging to `patient`, oldest first. Files whose name does
/// not carry a valid stamp are skipped.
pub fn list(dir: &Path, patient: &str) -> Result<Vec<EvolutionEntry>, StorageError> {
    let mut entries = Vec::new();
    for name in fs::list_file_names(dir)? {
        let Some(stamp) = file_names::evolution_stamp(&name, patient) else {
            continue;
        };
        let Ok(recorded_at) = DateTime::strptime(EVOLUTION_STAMP_FORMAT, stamp) else {
            tracing::debug!(file = %name, "skipping evolution file with invalid stamp");
            continue;
        };
        entries.push(EvolutionEntry {
            path: dir.join(&name),
            stamp: stamp.to_string(),
            recorded_at,
        });
    }
    entries.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at));
    Ok(entries)
}

/// Read an entry back. Any failure to locate or parse it is reported
/// as `NotFound`; the reason is logged.
pub fn read(path: &Path) -> Result<Evolution, StorageError> {
    fs::read_json(path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "evolution entry unreadable");
        StorageError::NotFound {
            path: path.to_path_buf(),
        }
    })
}
