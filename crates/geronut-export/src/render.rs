use serde::Serialize;
use tera::{Context, Tera};

use geronut_assessment::{compute, ClassificationRules, ComputedMetrics, Dashboard, Reading};
use geronut_core::PatientRecord;
use geronut_core::models::dietary::EatingHabits;
use geronut_core::models::identity::Identity;
use geronut_core::models::intervention::Intervention;

use crate::error::ExportError;

/// Built-in report, in Portuguese.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/report.md.tera");

const DEFAULT_TEMPLATE_NAME: &str = "report.md";

/// A labelled value, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub rotulo: &'static str,
    pub valor: String,
}

/// Everything a report template can reference. Keys are the Portuguese
/// names templates are written against.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext<'a> {
    pub paciente: &'a Identity,
    pub anamnese: Vec<Line>,
    pub medidas: Vec<Line>,
    pub data_medicao: Option<&'a str>,
    pub metricas: ComputedMetrics,
    pub doencas: Vec<&'static str>,
    pub medicamentos: &'a str,
    pub exames: Vec<Line>,
    pub recordatorio: Vec<Line>,
    pub frequencia: Vec<Line>,
    pub habitos: &'a EatingHabits,
    pub intervencao: &'a Intervention,
    pub evolucao: Vec<Line>,
    /// Dashboard indicators, already formatted (`--` when undefined).
    pub indicadores: Vec<Line>,
    pub fatores_risco: Vec<&'static str>,
    pub historico_peso: Vec<Line>,
}

impl<'a> ReportContext<'a> {
    pub fn new(record: &'a PatientRecord, rules: &ClassificationRules) -> Self {
        let anthropometrics = &record.anthropometrics;
        let metrics = compute(anthropometrics, record.identity.sex);
        let dashboard = Dashboard::build(record, rules);
        Self {
            paciente: &record.identity,
            anamnese: record
                .anamnesis
                .iter()
                .map(|(field, value)| line(field.label(), value))
                .collect(),
            medidas: anthropometrics
                .iter()
                .map(|(field, value)| line(field.label(), format_number(value)))
                .collect(),
            data_medicao: anthropometrics.measured_on(),
            doencas: record.clinical.conditions.iter().map(|c| c.label()).collect(),
            medicamentos: &record.clinical.medications,
            exames: record
                .clinical
                .labs
                .iter()
                .map(|(test, value)| line(test.label(), value))
                .collect(),
            recordatorio: record
                .dietary
                .recall
                .iter()
                .map(|(meal, text)| line(meal.label(), text))
                .collect(),
            frequencia: record
                .dietary
                .frequency
                .iter()
                .map(|(group, freq)| line(group.label(), freq.label()))
                .collect(),
            habitos: &record.dietary.habits,
            intervencao: &record.intervention,
            evolucao: record
                .evolution
                .iter()
                .map(|(field, value)| line(field.label(), value))
                .collect(),
            indicadores: indicators(&dashboard, &metrics),
            fatores_risco: dashboard.risk_factors.iter().map(|f| f.label()).collect(),
            historico_peso: weight_lines(&dashboard),
            metricas: metrics,
        }
    }
}

fn indicators(dashboard: &Dashboard, metrics: &ComputedMetrics) -> Vec<Line> {
    vec![
        line("IMC (kg/m²)", dashboard.bmi.to_string()),
        line("Classificação IMC", dashboard.bmi_class.to_string()),
        line("Relação Cintura-Quadril", dashboard.whr.to_string()),
        line("Classificação RCQ", dashboard.whr_class.to_string()),
        line("Perda de Peso (%)", dashboard.weight_loss_pct.to_string()),
        line("CMB (cm)", Reading::from(metrics.mamc).to_string()),
        line("AMB (cm²)", Reading::from(metrics.ama).to_string()),
        line("Estado Nutricional", dashboard.nutritional_status.to_string()),
        line("Risco Nutricional", dashboard.nutritional_risk.to_string()),
    ]
}

fn weight_lines(dashboard: &Dashboard) -> Vec<Line> {
    dashboard
        .weight_series
        .iter()
        .map(|point| Line {
            rotulo: "Peso (kg)",
            valor: format!("{}: {}", point.at.strftime("%d/%m/%Y %H:%M"), point.weight_kg),
        })
        .collect()
}

fn line(rotulo: &'static str, valor: impl Into<String>) -> Line {
    Line {
        rotulo,
        valor: valor.into(),
    }
}

/// Whole numbers print without a fraction; everything else with up to
/// two decimals.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Render a Tera template against any serializable context.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    context: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(context)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

/// Render a patient report, with the built-in template unless a custom
/// one is given.
pub fn render_report(
    record: &PatientRecord,
    rules: &ClassificationRules,
    template: Option<&str>,
) -> Result<String, ExportError> {
    let context = ReportContext::new(record, rules);
    let rendered = render_template(DEFAULT_TEMPLATE_NAME, template.unwrap_or(DEFAULT_TEMPLATE), &context)?;
    tracing::debug!(
        patient = record.patient_name(),
        custom = template.is_some(),
        bytes = rendered.len(),
        "report rendered"
    );
    Ok(rendered)
}
