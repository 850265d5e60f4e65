use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use geronut_assessment::ClassificationRules;
use geronut_assessment::risk::DEFAULT_ELDER_AGE_THRESHOLD;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const APP_DIR: &str = "geronut";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeronutConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Root of `pacientes/` and `evolucoes/`.
    pub data_dir: PathBuf,
    /// Reproduce first-release classification (missing BMI as 0, any
    /// birth date as advanced age). Added in v1.
    #[serde(default)]
    pub legacy_rules: bool,
    /// Added in v1.
    #[serde(default = "default_elder_age_threshold")]
    pub elder_age_threshold: i16,
}

fn default_elder_age_threshold() -> i16 {
    DEFAULT_ELDER_AGE_THRESHOLD
}

impl GeronutConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            data_dir: data_dir.into(),
            legacy_rules: false,
            elder_age_threshold: DEFAULT_ELDER_AGE_THRESHOLD,
        }
    }

    pub fn rules(&self) -> ClassificationRules {
        let base = if self.legacy_rules {
            ClassificationRules::legacy()
        } else {
            ClassificationRules::default()
        };
        ClassificationRules {
            elder_age_threshold: self.elder_age_threshold,
            ..base
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join(APP_DIR))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Platform data directory used when no config exists yet.
pub fn default_data_dir() -> eyre::Result<PathBuf> {
    let base = dirs::data_local_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join(APP_DIR))
}

/// The saved config, or the defaults when none has been written.
pub fn load_or_default() -> eyre::Result<GeronutConfig> {
    let path = config_path()?;
    if path.exists() {
        load_config_from(&path)
    } else {
        Ok(GeronutConfig::with_data_dir(default_data_dir()?))
    }
}

pub fn load_config_from(path: &Path) -> eyre::Result<GeronutConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: GeronutConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update geronut."
        ));
    }

    // v0 → v1: add the classification settings
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("legacy_rules")
            .or_insert(serde_json::Value::Bool(false));
        obj.entry("elder_age_threshold")
            .or_insert(serde_json::Value::Number(DEFAULT_ELDER_AGE_THRESHOLD.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added classification settings)");
    }

    Ok(json)
}

pub fn save_config(config: &GeronutConfig) -> eyre::Result<PathBuf> {
    let path = config_path()?;
    save_config_to(&path, config)?;
    Ok(path)
}

pub fn save_config_to(path: &Path, config: &GeronutConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
