use geronut_assessment::classification::{classify_bmi, classify_whr, nutritional_status};
use geronut_assessment::{BmiClass, ClassificationRules, NutritionalStatus, WhrRisk};
use geronut_core::vocab::Sex;
use geronut_core::ValidationKind;

#[test]
fn bmi_boundaries() {
    assert_eq!(classify_bmi(21.99), BmiClass::Underweight);
    assert_eq!(classify_bmi(22.0), BmiClass::Adequate);
    assert_eq!(classify_bmi(27.0), BmiClass::Adequate);
    assert_eq!(classify_bmi(27.01), BmiClass::Overweight);
}

#[test]
fn whr_boundaries_by_sex() {
    assert_eq!(classify_whr(0.95, Some(Sex::Male)).unwrap(), WhrRisk::Low);
    assert_eq!(classify_whr(0.951, Some(Sex::Male)).unwrap(), WhrRisk::High);
    assert_eq!(classify_whr(0.80, Some(Sex::Female)).unwrap(), WhrRisk::Low);
    assert_eq!(classify_whr(0.801, Some(Sex::Female)).unwrap(), WhrRisk::High);
}

#[test]
fn whr_without_sex_is_a_precondition_error() {
    let err = classify_whr(0.85, None).unwrap_err();
    assert_eq!(err.kind, ValidationKind::MissingPrecondition);
    assert_eq!(err.field, "sexo");
}

#[test]
fn weight_loss_above_ten_percent_is_malnutrition() {
    let rules = ClassificationRules::default();
    assert_eq!(
        nutritional_status(Some(23.0), Some(10.0), &rules),
        Some(NutritionalStatus::Adequate)
    );
    assert_eq!(
        nutritional_status(Some(23.0), Some(10.01), &rules),
        Some(NutritionalStatus::Malnutrition)
    );
}

#[test]
fn status_follows_bmi_otherwise() {
    let rules = ClassificationRules::default();
    assert_eq!(nutritional_status(Some(21.0), None, &rules), Some(NutritionalStatus::Malnutrition));
    assert_eq!(nutritional_status(Some(28.0), Some(2.0), &rules), Some(NutritionalStatus::Overweight));
    assert_eq!(nutritional_status(Some(27.0), Some(-3.0), &rules), Some(NutritionalStatus::Adequate));
}

#[test]
fn missing_bmi_is_undefined_unless_loss_decides() {
    let rules = ClassificationRules::default();
    assert_eq!(nutritional_status(None, Some(4.0), &rules), None);
    assert_eq!(nutritional_status(None, Some(12.0), &rules), Some(NutritionalStatus::Malnutrition));
}

#[test]
fn legacy_rules_treat_missing_bmi_as_zero() {
    let rules = ClassificationRules::legacy();
    assert_eq!(nutritional_status(None, None, &rules), Some(NutritionalStatus::Malnutrition));
}

#[test]
fn labels_are_portuguese() {
    assert_eq!(NutritionalStatus::Malnutrition.to_string(), "Desnutrição");
    assert_eq!(serde_json::to_value(BmiClass::Underweight).unwrap(), "Baixo peso");
}
