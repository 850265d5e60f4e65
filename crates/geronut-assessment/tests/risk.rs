use geronut_assessment::risk::{age_on, nutritional_risk, parse_birth_date, patient_age};
use geronut_assessment::{ClassificationRules, RiskFactor, RiskLevel};
use geronut_core::vocab::{Appetite, ChronicCondition};
use geronut_core::PatientRecord;
use jiff::civil::date;

fn rules_on(year: i16, month: i8, day: i8) -> ClassificationRules {
    ClassificationRules {
        reference_date: Some(date(year, month, day)),
        ..ClassificationRules::default()
    }
}

#[test]
fn birth_date_formats() {
    assert_eq!(parse_birth_date("05/03/1940").unwrap(), date(1940, 3, 5));
    assert_eq!(parse_birth_date("1940-03-05").unwrap(), date(1940, 3, 5));
    assert_eq!(parse_birth_date("05-03-1940").unwrap(), date(1940, 3, 5));
    assert!(parse_birth_date("março de 1940").is_err());
}

#[test]
fn age_counts_completed_years() {
    assert_eq!(age_on(date(1940, 3, 5), date(2024, 3, 4)), 83);
    assert_eq!(age_on(date(1940, 3, 5), date(2024, 3, 5)), 84);
}

#[test]
fn unreadable_birth_date_falls_back_to_recorded_age() {
    let mut record = PatientRecord::new();
    record.identity.birth_date = Some("desconhecida".into());
    record.identity.age = Some("82".into());
    assert_eq!(patient_age(&record.identity, &rules_on(2024, 1, 1)), Some(82));
}

#[test]
fn empty_record_is_low_risk() {
    let risk = nutritional_risk(&PatientRecord::new(), None, &ClassificationRules::default());
    assert_eq!(risk.level, RiskLevel::Low);
    assert!(risk.factors.is_empty());
}

#[test]
fn age_factor_needs_age_over_threshold() {
    let mut record = PatientRecord::new();
    record.identity.birth_date = Some("10/06/1950".into());
    let risk = nutritional_risk(&record, None, &rules_on(2024, 6, 10));
    assert!(risk.factors.is_empty());

    record.identity.birth_date = Some("10/06/1940".into());
    let risk = nutritional_risk(&record, None, &rules_on(2024, 6, 10));
    assert_eq!(risk.factors, vec![RiskFactor::AdvancedAge]);
}

#[test]
fn legacy_age_factor_only_checks_presence() {
    let mut record = PatientRecord::new();
    record.identity.birth_date = Some("10/06/1990".into());
    let risk = nutritional_risk(&record, None, &ClassificationRules::legacy());
    assert_eq!(risk.factors, vec![RiskFactor::AdvancedAge]);
    assert_eq!(risk.level, RiskLevel::Moderate);
}

#[test]
fn three_factors_is_high_risk() {
    let mut record = PatientRecord::new();
    record.clinical.conditions.extend([
        ChronicCondition::Hypertension,
        ChronicCondition::Diabetes,
        ChronicCondition::Anemia,
    ]);
    record.dietary.habits.appetite = Some(Appetite::Poor);

    let risk = nutritional_risk(&record, Some(6.67), &ClassificationRules::default());
    assert_eq!(
        risk.factors,
        vec![RiskFactor::Multimorbidity, RiskFactor::WeightLoss, RiskFactor::PoorAppetite]
    );
    assert_eq!(risk.level, RiskLevel::High);
}

#[test]
fn two_conditions_and_five_percent_are_not_factors() {
    let mut record = PatientRecord::new();
    record.clinical.conditions.extend([ChronicCondition::Hypertension, ChronicCondition::Diabetes]);
    record.dietary.habits.appetite = Some(Appetite::Good);

    let risk = nutritional_risk(&record, Some(5.0), &ClassificationRules::default());
    assert_eq!(risk.level, RiskLevel::Low);
}
