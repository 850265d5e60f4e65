//! On-disk shape of a patient snapshot.
//!
//! Writing borrows the record; reading builds owned values and only turns
//! them into a [`PatientRecord`] once the whole file has parsed.

use std::path::Path;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use geronut_assessment::{compute, ComputedMetrics};
use geronut_core::PatientRecord;
use geronut_core::models::anamnesis::Anamnesis;
use geronut_core::models::anthropometry::Measurements;
use geronut_core::models::clinical::Clinical;
use geronut_core::models::dietary::Dietary;
use geronut_core::models::evolution::Evolution;
use geronut_core::models::history::{parse_timestamp, ConsultationHistory};
use geronut_core::models::identity::Identity;
use geronut_core::models::intervention::Intervention;

use crate::error::StorageError;
use crate::fs;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    paciente: PatientRef<'a>,
    antropometricos: AnthropometricsRef<'a>,
    clinicos: &'a Clinical,
    alimentares: &'a Dietary,
    intervencao: &'a Intervention,
    evolucao: &'a Evolution,
    historico: &'a ConsultationHistory,
    ultima_atualizacao: Timestamp,
}

#[derive(Serialize)]
struct PatientRef<'a> {
    #[serde(flatten)]
    identity: &'a Identity,
    anamnese: &'a Anamnesis,
}

/// Raw measurements with the derived metrics written alongside, for
/// readers of the file that don't recompute them.
#[derive(Serialize)]
struct AnthropometricsRef<'a> {
    #[serde(flatten)]
    measurements: &'a Measurements,
    #[serde(flatten)]
    metrics: ComputedMetrics,
}

/// Sections other than `paciente` may be missing from older files.
#[derive(Deserialize)]
struct SnapshotDoc {
    paciente: PatientDoc,
    #[serde(default)]
    antropometricos: Measurements,
    #[serde(default)]
    clinicos: Clinical,
    #[serde(default)]
    alimentares: Dietary,
    #[serde(default)]
    intervencao: Intervention,
    #[serde(default)]
    evolucao: Evolution,
    #[serde(default)]
    historico: ConsultationHistory,
    #[serde(default)]
    ultima_atualizacao: Option<String>,
}

#[derive(Deserialize)]
struct PatientDoc {
    #[serde(flatten)]
    identity: Identity,
    #[serde(default)]
    anamnese: Anamnesis,
}

/// A record read back from disk, with the time it was last saved.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSnapshot {
    pub record: PatientRecord,
    /// `None` when the file carries no readable save time.
    pub saved_at: Option<Timestamp>,
}

pub fn write(path: &Path, record: &PatientRecord, saved_at: Timestamp) -> Result<(), StorageError> {
    let doc = SnapshotRef {
        paciente: PatientRef {
            identity: &record.identity,
            anamnese: &record.anamnesis,
        },
        antropometricos: AnthropometricsRef {
            measurements: &record.anthropometrics,
            metrics: compute(&record.anthropometrics, record.identity.sex),
        },
        clinicos: &record.clinical,
        alimentares: &record.dietary,
        intervencao: &record.intervention,
        evolucao: &record.evolution,
        historico: record.history(),
        ultima_atualizacao: saved_at,
    };
    fs::write_json(path, &doc)
}

/// Read a snapshot. A file that is not a JSON object with a `paciente`
/// section (an evolution entry, say) is `CorruptData`.
pub fn read(path: &Path) -> Result<LoadedSnapshot, StorageError> {
    let value: serde_json::Value = fs::read_json(path)?;
    if !value.is_object() {
        return Err(StorageError::corrupt(path, "snapshot is not a JSON object"));
    }
    let doc: SnapshotDoc = serde_json::from_value(value).map_err(|e| StorageError::corrupt(path, e))?;

    let saved_at = doc.ultima_atualizacao.as_deref().and_then(|raw| {
        parse_timestamp(raw)
            .inspect_err(|e| tracing::warn!(path = %path.display(), "ignoring save time: {e}"))
            .ok()
    });

    let mut record = PatientRecord::with_history(doc.historico);
    record.identity = doc.paciente.identity;
    record.anamnesis = doc.paciente.anamnese;
    record.anthropometrics = doc.antropometricos;
    record.clinical = doc.clinicos;
    record.dietary = doc.alimentares;
    record.intervention = doc.intervencao;
    record.evolution = doc.evolucao;

    Ok(LoadedSnapshot { record, saved_at })
}
