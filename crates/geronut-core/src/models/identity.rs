use serde::{Deserialize, Serialize};

use super::blank_as_none;
use crate::form::{non_blank, parse_optional_term, FormValues, FromForm, ValidationError};
use crate::vocab::{MaritalStatus, Schooling, Sex};

/// Placeholder used for file naming when no patient name has been entered.
pub const UNNAMED_PATIENT: &str = "paciente";

/// Personal data. Persisted under `paciente`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "nome", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free text as entered, usually `dd/mm/yyyy`.
    #[serde(rename = "data_nascimento", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(rename = "idade", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(rename = "sexo", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(rename = "registro", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    #[serde(rename = "telefone", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "endereco", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "profissao", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(rename = "contato_emergencia", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(rename = "telefone_emergencia", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub emergency_phone: Option<String>,
    #[serde(rename = "estado_civil", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(rename = "escolaridade", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub schooling: Option<Schooling>,
    #[serde(rename = "data_admissao", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub admission_date: Option<String>,
    /// Stamped on every identity save; never taken from a form.
    #[serde(rename = "data_cadastro", default, deserialize_with = "blank_as_none", skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
}

impl Identity {
    /// Name used to address files, falling back to [`UNNAMED_PATIENT`].
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_PATIENT)
    }
}

impl FromForm for Identity {
    fn from_form(form: &FormValues) -> Result<Self, ValidationError> {
        let mut identity = Identity {
            sex: parse_optional_term("sexo", form.get("sexo"))?,
            marital_status: parse_optional_term("estado_civil", form.get("estado_civil"))?,
            schooling: parse_optional_term("escolaridade", form.get("escolaridade"))?,
            ..Identity::default()
        };

        for (key, raw) in form {
            let value = non_blank(raw).map(str::to_string);
            let slot = match key.as_str() {
                "sexo" | "estado_civil" | "escolaridade" => continue,
                "nome" => &mut identity.name,
                "data_nascimento" => &mut identity.birth_date,
                "idade" => &mut identity.age,
                "registro" => &mut identity.registration,
                "telefone" => &mut identity.phone,
                "email" => &mut identity.email,
                "endereco" => &mut identity.address,
                "profissao" => &mut identity.occupation,
                "contato_emergencia" => &mut identity.emergency_contact,
                "telefone_emergencia" => &mut identity.emergency_phone,
                "data_admissao" => &mut identity.admission_date,
                _ => return Err(ValidationError::unknown_field(key, raw)),
            };
            *slot = value;
        }

        Ok(identity)
    }
}
