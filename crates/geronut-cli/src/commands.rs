use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

use geronut_assessment::compute_form;
use geronut_core::form::{parse_optional_term, FormValues};
use geronut_core::vocab::Sex;
use geronut_export::render_report;
use geronut_storage::{PatientStore, Session, StorageError};

use crate::config::{self, GeronutConfig};

/// Record section addressed by `geronut save`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Section {
    #[value(name = "identidade")]
    Identity,
    #[value(name = "anamnese")]
    Anamnesis,
    #[value(name = "antropometria")]
    Anthropometrics,
    #[value(name = "clinico")]
    Clinical,
    #[value(name = "alimentar")]
    Dietary,
    #[value(name = "intervencao")]
    Intervention,
}

/// Parse a `key=value` pair for `--set`.
pub fn parse_key_val(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    Ok((key.trim().to_string(), value.to_string()))
}

pub fn form_from_pairs(pairs: Vec<(String, String)>) -> FormValues {
    pairs.into_iter().collect()
}

fn store_for(config: &GeronutConfig) -> PatientStore {
    PatientStore::new(&config.data_dir)
}

/// Open the patient's snapshot, or start a fresh record under that name.
fn open_or_start(config: &GeronutConfig, patient: &str) -> Result<Session> {
    let store = store_for(config);
    match Session::open(store.clone(), config.rules(), patient) {
        Ok(session) => Ok(session),
        Err(StorageError::NotFound { .. }) => {
            tracing::info!(patient, "no snapshot yet, starting a new record");
            Ok(Session::for_patient(store, config.rules(), patient))
        }
        Err(e) => Err(e).wrap_err_with(|| format!("failed to open patient '{patient}'")),
    }
}

fn open_existing(config: &GeronutConfig, patient: &str) -> Result<Session> {
    Session::open(store_for(config), config.rules(), patient)
        .wrap_err_with(|| format!("failed to open patient '{patient}'"))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Compute metrics from raw values without touching any record.
/// Unmet classification preconditions are printed under `avisos`.
pub fn calc(pairs: Vec<(String, String)>, sex: Option<String>) -> Result<()> {
    let sex: Option<Sex> = parse_optional_term("sexo", sex.as_ref())?;
    let calculation = compute_form(&form_from_pairs(pairs), sex)?;
    print_json(&calculation)
}

pub fn save(config: &GeronutConfig, patient: &str, section: Section, pairs: Vec<(String, String)>) -> Result<()> {
    let mut form = form_from_pairs(pairs);
    let mut session = open_or_start(config, patient)?;

    match section {
        Section::Identity => {
            form.entry("nome".to_string()).or_insert_with(|| patient.to_string());
            let path = session.save_identity(&form)?;
            println!("saved {}", path.display());
        }
        Section::Anamnesis => {
            let path = session.save_anamnesis(&form)?;
            println!("saved {}", path.display());
        }
        Section::Anthropometrics => {
            let entry = session.save_anthropometrics(&form)?;
            match entry.weight_kg {
                Some(weight) => println!("saved; history entry {} ({weight} kg)", entry.at),
                None => println!("saved; history entry {} (no weight)", entry.at),
            }
        }
        Section::Clinical => {
            let path = session.save_clinical(&form)?;
            println!("saved {}", path.display());
        }
        Section::Dietary => {
            let path = session.save_dietary(&form)?;
            println!("saved {}", path.display());
        }
        Section::Intervention => {
            let path = session.save_intervention(&form)?;
            println!("saved {}", path.display());
        }
    }
    Ok(())
}

/// Print the snapshot file as stored.
pub fn show(config: &GeronutConfig, patient: &str) -> Result<()> {
    let session = open_existing(config, patient)?;
    let path = session.store().resolve(patient);
    let contents = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    println!("{contents}");
    Ok(())
}

pub fn list(config: &GeronutConfig) -> Result<()> {
    for name in store_for(config).list_snapshots()? {
        println!("{name}");
    }
    Ok(())
}

pub fn dashboard(config: &GeronutConfig, patient: &str) -> Result<()> {
    let session = open_existing(config, patient)?;
    print_json(&session.dashboard())
}

pub fn report(config: &GeronutConfig, patient: &str, template: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let session = open_existing(config, patient)?;
    let template = template
        .map(|path| {
            std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read template {}", path.display()))
        })
        .transpose()?;

    let rendered = render_report(session.record(), session.rules(), template.as_deref())?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            println!("report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

pub fn evolution_record(config: &GeronutConfig, patient: &str, pairs: Vec<(String, String)>) -> Result<()> {
    let mut session = open_existing(config, patient)?;
    let entry = session.record_evolution(&form_from_pairs(pairs))?;
    println!("evolution saved to {}", entry.path.display());
    Ok(())
}

pub fn evolution_list(config: &GeronutConfig, patient: &str) -> Result<()> {
    let session = open_existing(config, patient)?;
    for entry in session.evolution_entries()? {
        println!("{}  {}", entry.stamp, entry.recorded_at);
    }
    Ok(())
}

/// Replace the active evolution with an entry and save the snapshot.
pub fn evolution_load(config: &GeronutConfig, patient: &str, entry: &str) -> Result<()> {
    let mut session = open_existing(config, patient)?;
    let path = session.store().evolution_path(patient, entry);
    session
        .load_evolution(&path)
        .wrap_err_with(|| format!("failed to load evolution entry '{entry}'"))?;
    session.save()?;
    println!("active evolution replaced from {}", path.display());
    Ok(())
}

/// Clear the active evolution and save the snapshot. Entry files stay.
pub fn evolution_reset(config: &GeronutConfig, patient: &str) -> Result<()> {
    let mut session = open_existing(config, patient)?;
    session.reset_evolution();
    session.save()?;
    println!("active evolution cleared");
    Ok(())
}

pub fn config_show(config: &GeronutConfig) -> Result<()> {
    print_json(config)
}

pub fn config_init(data_dir: Option<PathBuf>, legacy_rules: bool, elder_age_threshold: Option<i16>) -> Result<()> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => config::default_data_dir()?,
    };
    let mut config = GeronutConfig::with_data_dir(data_dir);
    config.legacy_rules = legacy_rules;
    if let Some(threshold) = elder_age_threshold {
        config.elder_age_threshold = threshold;
    }
    let path = config::save_config(&config)?;
    println!("config written to {}", path.display());
    Ok(())
}
