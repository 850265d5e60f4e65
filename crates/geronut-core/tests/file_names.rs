use geronut_core::file_names::{
    evolution_file_name, evolution_stamp, normalize_patient_name, snapshot_file_name,
};

#[test]
fn whitespace_runs_become_one_separator() {
    assert_eq!(normalize_patient_name("Maria  da\tSilva"), "Maria_da_Silva");
    assert_eq!(normalize_patient_name("  João Souza "), "João_Souza");
}

#[test]
fn path_separators_never_escape_the_directory() {
    assert_eq!(normalize_patient_name("../etc/passwd"), ".._etc_passwd");
    assert!(!normalize_patient_name("a/b\\c").contains(['/', '\\']));
}

#[test]
fn blank_name_falls_back_to_placeholder() {
    assert_eq!(normalize_patient_name("   "), "paciente");
}

#[test]
fn snapshot_and_evolution_file_names() {
    assert_eq!(snapshot_file_name("Maria Silva"), "avaliacao_Maria_Silva.json");
    assert_eq!(
        evolution_file_name("Maria Silva", "20240315_143000"),
        "evolucao_Maria_Silva_20240315_143000.json"
    );
}

#[test]
fn stamp_is_extracted_only_for_the_right_patient() {
    let name = evolution_file_name("Maria Silva", "20240315_143000");
    assert_eq!(evolution_stamp(&name, "Maria Silva"), Some("20240315_143000"));
    assert_eq!(evolution_stamp(&name, "Maria"), None);
    assert_eq!(evolution_stamp("evolucao_Maria_Silva_latest.json", "Maria Silva"), None);
}
