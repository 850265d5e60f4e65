//! File-name conventions.
//!
//! Pure string functions with no filesystem access. These define the canonical
//! layout of files under the data directory:
//!
//! ```text
//! pacientes/avaliacao_<name>.json
//! evolucoes/evolucao_<name>_<YYYYMMDD_HHMMSS>.json
//! ```

use crate::models::identity::UNNAMED_PATIENT;

pub const SNAPSHOTS_DIR: &str = "pacientes";

pub const EVOLUTIONS_DIR: &str = "evolucoes";

/// `strftime` pattern of the evolution file suffix (second resolution).
pub const EVOLUTION_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const SNAPSHOT_PREFIX: &str = "avaliacao_";
const EVOLUTION_PREFIX: &str = "evolucao_";
const EXTENSION: &str = ".json";

/// Normalize a patient name for use in a file name: runs of whitespace
/// (and path separators or other characters file systems reject) become
/// a single `_`. A blank name maps to [`UNNAMED_PATIENT`].
pub fn normalize_patient_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.trim().chars() {
        if ch.is_whitespace() || matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
            pending_separator = !out.is_empty();
            continue;
        }
        if pending_separator {
            out.push('_');
            pending_separator = false;
        }
        out.push(ch);
    }
    if out.is_empty() {
        UNNAMED_PATIENT.to_string()
    } else {
        out
    }
}

pub fn snapshot_file_name(patient: &str) -> String {
    format!("{SNAPSHOT_PREFIX}{}{EXTENSION}", normalize_patient_name(patient))
}

pub fn evolution_file_name(patient: &str, stamp: &str) -> String {
    format!("{}{stamp}{EXTENSION}", evolution_prefix(patient))
}

/// Common prefix of every evolution file for a patient.
pub fn evolution_prefix(patient: &str) -> String {
    format!("{EVOLUTION_PREFIX}{}_", normalize_patient_name(patient))
}

/// Extract the `YYYYMMDD_HHMMSS` stamp from an evolution file name that
/// belongs to `patient`.
pub fn evolution_stamp<'a>(file_name: &'a str, patient: &str) -> Option<&'a str> {
    let stamp = file_name
        .strip_prefix(&evolution_prefix(patient))?
        .strip_suffix(EXTENSION)?;
    let well_formed = stamp.len() == 15
        && stamp.char_indices().all(|(i, c)| if i == 8 { c == '_' } else { c.is_ascii_digit() });
    well_formed.then_some(stamp)
}
