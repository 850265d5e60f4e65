use geronut_cli::commands::{form_from_pairs, parse_key_val, save, Section};
use geronut_cli::config::GeronutConfig;

#[test]
fn key_value_pairs_split_on_first_equals() {
    assert_eq!(
        parse_key_val("medicamentos=a=b").unwrap(),
        ("medicamentos".to_string(), "a=b".to_string())
    );
    assert!(parse_key_val("sem_igual").is_err());
}

#[test]
fn save_creates_snapshot_under_patient_name() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeronutConfig::with_data_dir(dir.path());

    save(
        &config,
        "Ana Lima",
        Section::Identity,
        vec![("sexo".to_string(), "Feminino".to_string())],
    )
    .unwrap();
    save(
        &config,
        "Ana Lima",
        Section::Anthropometrics,
        vec![("peso_atual".to_string(), "55".to_string())],
    )
    .unwrap();

    let path = dir.path().join("pacientes/avaliacao_Ana_Lima.json");
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["paciente"]["nome"], "Ana Lima");
    assert_eq!(json["paciente"]["sexo"], "Feminino");
    assert_eq!(json["antropometricos"]["peso_atual"], 55.0);
    assert_eq!(form_from_pairs(vec![]).len(), 0);
}

#[test]
fn save_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeronutConfig::with_data_dir(dir.path());
    let result = save(
        &config,
        "Ana Lima",
        Section::Anthropometrics,
        vec![("peso_atual".to_string(), "muito".to_string())],
    );
    assert!(result.is_err());
    assert!(!dir.path().join("pacientes").exists());
}
