use geronut_cli::config::{load_config_from, save_config_to, GeronutConfig};

#[test]
fn pre_versioned_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"data_dir": "/srv/geronut"}"#).unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.data_dir, std::path::PathBuf::from("/srv/geronut"));
    assert!(!config.legacy_rules);
    assert_eq!(config.elder_age_threshold, 80);
}

#[test]
fn newer_config_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"config_version": 99, "data_dir": "/x"}"#).unwrap();
    assert!(load_config_from(&path).is_err());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sub/config.json");
    let mut config = GeronutConfig::with_data_dir(dir.path().join("dados"));
    config.legacy_rules = true;
    config.elder_age_threshold = 75;

    save_config_to(&path, &config).unwrap();
    assert!(!dir.path().join("sub/config.json.tmp").exists());
    assert_eq!(load_config_from(&path).unwrap(), config);
}

#[test]
fn rules_follow_config() {
    let mut config = GeronutConfig::with_data_dir("/x");
    config.elder_age_threshold = 70;
    let rules = config.rules();
    assert!(!rules.legacy_bmi_default);
    assert_eq!(rules.elder_age_threshold, 70);

    config.legacy_rules = true;
    let rules = config.rules();
    assert!(rules.legacy_bmi_default && rules.legacy_age_factor);
    assert_eq!(rules.elder_age_threshold, 70);
}
