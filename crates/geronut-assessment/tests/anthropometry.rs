use geronut_assessment::anthropometry::{ama, bmi, mamc, weight_loss_pct, whr};
use geronut_assessment::{compute, compute_form, BmiClass, WhrRisk};
use geronut_core::models::anthropometry::Measurements;
use geronut_core::vocab::{AnthropometricField as F, Sex};
use geronut_core::form::ValidationKind;
use geronut_core::FormValues;
use proptest::prelude::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn weight_loss_of_eight_in_eighty_is_ten_percent() {
    let loss = weight_loss_pct(80.0, 72.0).unwrap();
    assert!(approx(loss, 10.0), "got {loss}");
}

#[test]
fn weight_gain_is_negative_loss() {
    let loss = weight_loss_pct(70.0, 77.0).unwrap();
    assert!(approx(loss, -10.0));
}

#[test]
fn non_positive_inputs_leave_metrics_undefined() {
    assert_eq!(bmi(70.0, 0.0), None);
    assert_eq!(whr(90.0, 0.0), None);
    assert_eq!(weight_loss_pct(0.0, 70.0), None);
    assert_eq!(mamc(0.0, 15.0), None);
}

#[test]
fn arm_muscle_from_circumference_and_skinfold() {
    let mamc = mamc(28.0, 15.0).unwrap();
    assert!(approx(mamc, 28.0 - std::f64::consts::PI * 1.5));
    let area = ama(mamc);
    assert!(approx(area, mamc * mamc / (4.0 * std::f64::consts::PI)));
}

#[test]
fn end_to_end_scenario() {
    let measurements = Measurements::default()
        .with(F::CurrentWeight, 70.0)
        .with(F::Height, 165.0)
        .with(F::WaistCircumference, 90.0)
        .with(F::HipCircumference, 100.0)
        .with(F::HabitualWeight, 75.0);

    let metrics = compute(&measurements, Some(Sex::Female));

    let bmi = metrics.bmi.unwrap();
    assert!((bmi - 25.71).abs() < 0.01, "got {bmi}");
    assert_eq!(metrics.bmi_class, Some(BmiClass::Adequate));
    assert!(approx(metrics.whr.unwrap(), 0.9));
    assert_eq!(metrics.whr_class, Some(WhrRisk::High));
    assert!((metrics.weight_loss_pct.unwrap() - 6.67).abs() < 0.01);
    assert_eq!(metrics.mamc, None);
    assert_eq!(metrics.ama, None);
}

#[test]
fn whr_without_sex_is_reported_but_unclassified() {
    let measurements = Measurements::default()
        .with(F::WaistCircumference, 90.0)
        .with(F::HipCircumference, 100.0);
    let metrics = compute(&measurements, None);
    assert!(metrics.whr.is_some());
    assert_eq!(metrics.whr_class, None);
}

#[test]
fn empty_measurements_compute_nothing() {
    assert!(compute(&Measurements::default(), Some(Sex::Male)).is_empty());
}

#[test]
fn compute_form_rejects_text_in_numeric_field() {
    let form: FormValues = [("peso_atual".to_string(), "setenta".to_string())].into();
    assert!(compute_form(&form, None).is_err());
}

#[test]
fn compute_form_reports_missing_sex_for_whr() {
    let form: FormValues = [
        ("circ_cintura".to_string(), "90".to_string()),
        ("circ_quadril".to_string(), "100".to_string()),
    ]
    .into();
    let calculation = compute_form(&form, None).unwrap();
    assert!(approx(calculation.metrics.whr.unwrap(), 0.9));
    assert_eq!(calculation.metrics.whr_class, None);
    assert_eq!(calculation.warnings.len(), 1);
    assert_eq!(calculation.warnings[0].field, "sexo");
    assert_eq!(calculation.warnings[0].kind, ValidationKind::MissingPrecondition);

    let json = serde_json::to_value(&calculation).unwrap();
    assert_eq!(json["avisos"][0]["field"], "sexo");
    assert!(json.get("rcq").is_some());

    let with_sex = compute_form(&form, Some(Sex::Female)).unwrap();
    assert!(with_sex.warnings.is_empty());
    assert_eq!(with_sex.metrics.whr_class, Some(WhrRisk::High));
    assert!(serde_json::to_value(&with_sex).unwrap().get("avisos").is_none());
}

#[test]
fn computed_metrics_serialize_with_persisted_keys() {
    let measurements = Measurements::default()
        .with(F::CurrentWeight, 70.0)
        .with(F::Height, 165.0);
    let json = serde_json::to_value(compute(&measurements, None)).unwrap();
    assert_eq!(json["classificacao_imc"], "Adequado");
    assert!(json.get("imc").is_some());
    assert!(json.get("rcq").is_none());
}

proptest! {
    #[test]
    fn bmi_matches_formula(weight in 20.0f64..250.0, height_cm in 100.0f64..220.0) {
        let measurements = Measurements::default()
            .with(F::CurrentWeight, weight)
            .with(F::Height, height_cm);
        let expected = weight / (height_cm / 100.0).powi(2);
        let got = compute(&measurements, None).bmi.unwrap();
        prop_assert!((got - expected).abs() < 1e-9);
    }

    #[test]
    fn weight_loss_sign_follows_trend(habitual in 30.0f64..150.0, current in 30.0f64..150.0) {
        let loss = weight_loss_pct(habitual, current).unwrap();
        prop_assert_eq!(loss > 0.0, current < habitual);
    }
}
