use geronut_assessment::{BmiClass, ClassificationRules, Dashboard, NutritionalStatus, Reading, RiskLevel};
use geronut_core::models::anthropometry::Measurements;
use geronut_core::vocab::AnthropometricField as F;
use geronut_core::PatientRecord;

#[test]
fn empty_record_shows_no_data_everywhere() {
    let dashboard = Dashboard::build(&PatientRecord::new(), &ClassificationRules::default());
    assert!(dashboard.bmi.is_no_data());
    assert!(dashboard.whr_class.is_no_data());
    assert!(dashboard.nutritional_status.is_no_data());
    assert_eq!(dashboard.nutritional_risk, RiskLevel::Low);
    assert!(dashboard.weight_series.is_empty());

    let json = serde_json::to_value(&dashboard).unwrap();
    assert_eq!(json["imc"], "--");
    assert_eq!(json["estado_nutricional"], "--");
}

#[test]
fn dashboard_reflects_every_anthropometric_save() {
    let mut record = PatientRecord::new();
    let first = Measurements::default()
        .with(F::CurrentWeight, 70.0)
        .with(F::Height, 165.0);
    record.save_anthropometrics(&first, "2024-03-01T10:00:00Z".parse().unwrap());
    let second = Measurements::default().with(F::CurrentWeight, 58.0);
    record.save_anthropometrics(&second, "2024-04-01T10:00:00Z".parse().unwrap());

    let dashboard = Dashboard::build(&record, &ClassificationRules::default());
    assert_eq!(dashboard.bmi_class, Reading::Value(BmiClass::Underweight));
    assert_eq!(dashboard.nutritional_status, Reading::Value(NutritionalStatus::Malnutrition));
    assert_eq!(dashboard.weight_series.len(), 2);
    assert_eq!(dashboard.weight_series[1].weight_kg, Reading::Value(58.0));
}

#[test]
fn reading_display() {
    assert_eq!(Reading::Value(25.714).to_string(), "25.71");
    assert_eq!(Reading::<f64>::NoData.to_string(), "--");
    assert_eq!(Reading::Value(BmiClass::Adequate).to_string(), "Adequado");
}
