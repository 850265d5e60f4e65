use geronut_core::form::{parse_number, FormValues, FromForm};
use geronut_core::models::anthropometry::Measurements;
use geronut_core::models::clinical::Clinical;
use geronut_core::models::dietary::Dietary;
use geronut_core::models::evolution::Evolution;
use geronut_core::models::identity::Identity;
use geronut_core::vocab::{
    AnthropometricField, Appetite, ChronicCondition, EvolutionField, FoodGroup, Frequency, LabTest,
    Meal, Sex,
};
use geronut_core::ValidationKind;

fn form(pairs: &[(&str, &str)]) -> FormValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn numbers_accept_decimal_comma() {
    assert_eq!(parse_number("peso_atual", "72,5").unwrap(), 72.5);
    assert_eq!(parse_number("peso_atual", " 70 ").unwrap(), 70.0);
}

#[test]
fn non_numeric_measurement_rejects_the_whole_form() {
    let err = Measurements::from_form(&form(&[("peso_atual", "70"), ("altura", "abc")])).unwrap_err();
    assert_eq!(err.kind, ValidationKind::NotNumeric);
    assert_eq!(err.field, "altura");
    assert_eq!(err.value, "abc");
}

#[test]
fn non_finite_numbers_are_rejected() {
    assert!(parse_number("altura", "NaN").is_err());
    assert!(parse_number("altura", "inf").is_err());
}

#[test]
fn blank_measurements_are_skipped() {
    let m = Measurements::from_form(&form(&[("peso_atual", "70"), ("altura", "  ")])).unwrap();
    assert_eq!(m.get(AnthropometricField::CurrentWeight), Some(70.0));
    assert_eq!(m.get(AnthropometricField::Height), None);
}

#[test]
fn unknown_field_is_reported() {
    let err = Measurements::from_form(&form(&[("peso_total", "70")])).unwrap_err();
    assert_eq!(err.kind, ValidationKind::UnknownField);
    assert_eq!(err.field, "peso_total");
}

#[test]
fn measurement_merge_keeps_missing_fields() {
    let mut current = Measurements::default()
        .with(AnthropometricField::CurrentWeight, 70.0)
        .with(AnthropometricField::Height, 165.0);
    let update = Measurements::default().with(AnthropometricField::CurrentWeight, 68.0);
    current.merge(&update);
    assert_eq!(current.get(AnthropometricField::CurrentWeight), Some(68.0));
    assert_eq!(current.get(AnthropometricField::Height), Some(165.0));
}

#[test]
fn identity_parses_vocabulary_by_label_or_key() {
    let by_label = Identity::from_form(&form(&[("nome", "Maria Silva"), ("sexo", "Feminino")])).unwrap();
    let by_key = Identity::from_form(&form(&[("sexo", "feminino")])).unwrap();
    assert_eq!(by_label.sex, Some(Sex::Female));
    assert_eq!(by_key.sex, Some(Sex::Female));
    assert_eq!(by_label.display_name(), "Maria Silva");
}

#[test]
fn identity_rejects_values_outside_vocabulary() {
    let err = Identity::from_form(&form(&[("sexo", "outro")])).unwrap_err();
    assert_eq!(err.kind, ValidationKind::NotInVocabulary);
    assert_eq!(err.field, "sexo");
}

#[test]
fn identity_never_takes_registration_time_from_form() {
    let err = Identity::from_form(&form(&[("data_cadastro", "2024-01-01")])).unwrap_err();
    assert_eq!(err.kind, ValidationKind::UnknownField);
}

#[test]
fn clinical_conditions_split_on_semicolon() {
    let clinical = Clinical::from_form(&form(&[
        ("doencas", "Hipertensão Arterial; diabetes;;Anemia"),
        ("medicamentos", "Losartana"),
        ("glicemia", "98"),
        ("hemoglobina", ""),
    ]))
    .unwrap();
    assert_eq!(clinical.conditions.len(), 3);
    assert!(clinical.conditions.contains(&ChronicCondition::Diabetes));
    assert_eq!(clinical.medications, "Losartana");
    assert_eq!(clinical.labs.get(LabTest::Glucose), Some("98"));
    assert_eq!(clinical.labs.get(LabTest::Hemoglobin), None);
}

#[test]
fn dietary_prefixed_keys() {
    let dietary = Dietary::from_form(&form(&[
        ("recordatorio.almoco", "Arroz, feijão"),
        ("frequencia.frutas", "Diário"),
        ("apetite", "Regular"),
    ]))
    .unwrap();
    assert_eq!(dietary.recall.get(&Meal::Lunch).map(String::as_str), Some("Arroz, feijão"));
    assert_eq!(dietary.frequency.get(&FoodGroup::Fruits), Some(&Frequency::Daily));
    assert_eq!(dietary.habits.appetite, Some(Appetite::Fair));
}

#[test]
fn dietary_rejects_unknown_meal() {
    let err = Dietary::from_form(&form(&[("recordatorio.brunch", "ovos")])).unwrap_err();
    assert_eq!(err.kind, ValidationKind::UnknownField);
}

#[test]
fn frequency_vocabulary_is_ordered() {
    assert!(Frequency::Never < Frequency::Daily);
    assert!(Frequency::Daily < Frequency::SeveralDaily);
}

#[test]
fn evolution_merge_is_partial() {
    let mut active = Evolution::default()
        .with(EvolutionField::Weight, "70")
        .with(EvolutionField::Evaluator, "Ana");
    let update = Evolution::from_form(&form(&[("peso_evo", "69"), ("nome_avaliador_evo", "")])).unwrap();
    active.merge(&update);
    assert_eq!(active.get(EvolutionField::Weight), Some("69"));
    assert_eq!(active.get(EvolutionField::Evaluator), Some("Ana"));
}
