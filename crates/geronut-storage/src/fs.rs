//! Plain-file primitives every store operation goes through.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// Write `value` as pretty JSON. The file is written to `<path>.tmp`,
/// synced, then renamed over `path`, so a failure never leaves a
/// half-written file behind.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
    }

    let tmp_path = tmp_path_for(path);
    let result = write_and_sync(&tmp_path, &body)
        .and_then(|()| fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e)));

    if result.is_err() {
        // Best effort; the original error is what the caller needs.
        let _ = fs::remove_file(&tmp_path);
    }
    result?;

    tracing::debug!(path = %path.display(), bytes = body.len(), "file written");
    Ok(())
}

/// Read and parse a JSON file. A missing file is `NotFound`; anything
/// that fails to parse is `CorruptData`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let body = fs::read(path).map_err(|e| StorageError::io(path, e))?;
    serde_json::from_slice(&body).map_err(|e| StorageError::corrupt(path, e))
}

/// File names (not paths) directly inside `dir`, sorted. A missing
/// directory lists as empty.
pub fn list_file_names(dir: &Path) -> Result<Vec<String>, StorageError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StorageError::io(dir, e)),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StorageError::io(dir, e))?;
        if !entry.file_type().map_err(|e| StorageError::io(entry.path(), e))?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn write_and_sync(path: &Path, body: &[u8]) -> Result<(), StorageError> {
    let mut file = fs::File::create(path).map_err(|e| StorageError::io(path, e))?;
    file.write_all(body).map_err(|e| StorageError::io(path, e))?;
    file.sync_all().map_err(|e| StorageError::io(path, e))
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
