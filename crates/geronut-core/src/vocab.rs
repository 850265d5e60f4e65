//! Closed vocabularies and fixed field-key sets.
//!
//! Categorical values arrive from form collaborators as one of a fixed set
//! of terms. Each term has a stable snake_case `key` (accepted in forms) and
//! a Portuguese `label` (shown to the clinician). Vocabulary terms are
//! persisted by label; field keys are persisted by key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// A value that is not part of the expected closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {vocabulary}")]
pub struct UnknownTerm {
    pub vocabulary: &'static str,
    pub value: String,
}

macro_rules! closed_set {
    (@emit $(#[$meta:meta])* $name:ident, $what:literal,
        [$( $variant:ident, $key:literal, $label:literal, $wire:literal );+]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownTerm;

            /// Accepts either the key or the label (ASCII case-insensitive).
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|term| term.key() == s || term.label().eq_ignore_ascii_case(s))
                    .ok_or_else(|| UnknownTerm {
                        vocabulary: $what,
                        value: s.to_string(),
                    })
            }
        }
    };
}

/// Categorical vocabulary: persisted by label.
macro_rules! vocabulary {
    ($(#[$meta:meta])* $name:ident ($what:literal) {
        $( $variant:ident => $key:literal, $label:literal; )+
    }) => {
        closed_set!(@emit $(#[$meta])* $name, $what, [$( $variant, $key, $label, $label );+]);
    };
}

/// Field-key set: persisted by key, labelled for display.
macro_rules! field_keys {
    ($(#[$meta:meta])* $name:ident ($what:literal) {
        $( $variant:ident => $key:literal, $label:literal; )+
    }) => {
        closed_set!(@emit $(#[$meta])* $name, $what, [$( $variant, $key, $label, $key );+]);
    };
}

vocabulary! {
    /// Required for waist-hip ratio classification.
    Sex ("sex") {
        Male => "masculino", "Masculino";
        Female => "feminino", "Feminino";
    }
}

vocabulary! {
    MaritalStatus ("marital status") {
        Single => "solteiro", "Solteiro(a)";
        Married => "casado", "Casado(a)";
        Divorced => "divorciado", "Divorciado(a)";
        Widowed => "viuvo", "Viúvo(a)";
    }
}

vocabulary! {
    Schooling ("schooling level") {
        Illiterate => "analfabeto", "Analfabeto";
        ElementaryIncomplete => "fundamental_incompleto", "Fundamental Incompleto";
        ElementaryComplete => "fundamental_completo", "Fundamental Completo";
        HighSchoolIncomplete => "medio_incompleto", "Médio Incompleto";
        HighSchoolComplete => "medio_completo", "Médio Completo";
        HigherIncomplete => "superior_incompleto", "Superior Incompleto";
        HigherComplete => "superior_completo", "Superior Completo";
        Postgraduate => "pos_graduacao", "Pós-graduação";
    }
}

vocabulary! {
    ChronicCondition ("chronic condition") {
        Hypertension => "hipertensao", "Hipertensão Arterial";
        Diabetes => "diabetes", "Diabetes Mellitus";
        Dyslipidemia => "dislipidemia", "Dislipidemia";
        Osteoporosis => "osteoporose", "Osteoporose";
        Arthritis => "artrite_artrose", "Artrite/Artrose";
        HeartDisease => "doenca_cardiaca", "Doença Cardíaca";
        KidneyDisease => "doenca_renal", "Doença Renal";
        LiverDisease => "doenca_hepatica", "Doença Hepática";
        Cancer => "cancer", "Câncer";
        Depression => "depressao", "Depressão";
        Dementia => "demencia", "Demência";
        Parkinson => "parkinson", "Parkinson";
        Copd => "dpoc", "DPOC";
        Hypothyroidism => "hipotireoidismo", "Hipotireoidismo";
        Anemia => "anemia", "Anemia";
    }
}

vocabulary! {
    /// The six slots of the 24-hour dietary recall.
    Meal ("meal") {
        Breakfast => "cafe_da_manha", "Café da Manhã";
        MorningSnack => "lanche_da_manha", "Lanche da Manhã";
        Lunch => "almoco", "Almoço";
        AfternoonSnack => "lanche_da_tarde", "Lanche da Tarde";
        Dinner => "jantar", "Jantar";
        Supper => "ceia", "Ceia";
    }
}

vocabulary! {
    FoodGroup ("food group") {
        Cereals => "cereais_paes", "Cereais/Pães";
        Fruits => "frutas", "Frutas";
        Vegetables => "vegetais_legumes", "Vegetais/Legumes";
        MeatEggs => "carnes_ovos", "Carnes/Ovos";
        Dairy => "leite_derivados", "Leite/Derivados";
        Legumes => "leguminosas", "Leguminosas";
        OilsFats => "oleos_gorduras", "Óleos/Gorduras";
        Sweets => "doces", "Doces";
        SoftDrinks => "refrigerantes", "Refrigerantes";
        Alcohol => "bebidas_alcoolicas", "Bebidas Alcoólicas";
    }
}

vocabulary! {
    /// Consumption frequency, ordered from least to most frequent.
    Frequency ("consumption frequency") {
        Never => "nunca", "Nunca";
        OnceOrTwiceWeekly => "1_2_semana", "1-2x/sem";
        ThreeToFourWeekly => "3_4_semana", "3-4x/sem";
        FiveToSixWeekly => "5_6_semana", "5-6x/sem";
        Daily => "diario", "Diário";
        SeveralDaily => "2_3_dia", "2-3x/dia";
    }
}

vocabulary! {
    Appetite ("appetite") {
        Good => "bom", "Bom";
        Fair => "regular", "Regular";
        Poor => "ruim", "Ruim";
    }
}

vocabulary! {
    Chewing ("chewing status") {
        Normal => "normal", "Normal";
        Difficulty => "dificuldade", "Dificuldade";
        Denture => "protese", "Prótese";
    }
}

vocabulary! {
    Swallowing ("swallowing status") {
        Normal => "normal", "Normal";
        Difficulty => "dificuldade", "Dificuldade";
    }
}

vocabulary! {
    Bowel ("bowel habit") {
        Normal => "normal", "Normal";
        Constipation => "constipacao", "Constipação";
        Diarrhea => "diarreia", "Diarreia";
    }
}

vocabulary! {
    Supplementation ("supplementation") {
        NotUsed => "nao", "Não";
        Vitamins => "vitaminas", "Vitaminas";
        Proteins => "proteinas", "Proteínas";
        Other => "outros", "Outros";
    }
}

field_keys! {
    AnamnesisField ("anamnesis field") {
        ChiefComplaint => "queixa_principal", "Queixa Principal";
        PastMedicalHistory => "historia_medica_pregressa", "História Médica Pregressa";
        Medications => "medicamentos_uso", "Medicamentos em Uso";
        Allergies => "alergias", "Alergias";
        FamilyHistory => "historico_familiar", "Histórico Familiar";
        SocialHistory => "historico_social", "Histórico Social";
        EatingHabits => "habitos_alimentares", "Hábitos Alimentares";
        Intolerances => "intolerancias", "Intolerâncias Alimentares";
        AppetiteChanges => "mudancas_apetite", "Mudanças no Apetite";
        WeightChanges => "mudancas_peso", "Mudanças de Peso Recente";
        GastrointestinalSymptoms => "sintomas_gastrointestinais", "Sintomas Gastrointestinais";
        FunctionalCapacity => "capacidades_funcionais", "Capacidades Funcionais";
        PhysicalActivity => "atividade_fisica", "Atividade Física";
        Supplements => "suplementos_utilizados", "Suplementos Utilizados";
        NutritionalGoals => "objetivos_nutricionais", "Objetivos Nutricionais";
    }
}

field_keys! {
    /// Numeric anthropometric measurements. Lengths in cm, skinfolds in mm.
    AnthropometricField ("anthropometric field") {
        CurrentWeight => "peso_atual", "Peso Atual (kg)";
        Height => "altura", "Altura (cm)";
        HabitualWeight => "peso_habitual", "Peso Habitual (kg)";
        EstimatedWeight => "peso_estimado", "Peso Estimado (kg)";
        IdealWeight => "peso_ideal", "Peso Ideal (kg)";
        EstimatedHeight => "altura_estimada", "Altura Estimada (cm)";
        KneeHeight => "altura_joelho", "Altura do Joelho (cm)";
        ArmCircumference => "circ_braco", "Circunferência do Braço (cm)";
        ArmMuscleCircumference => "circ_musc_braco", "Circunferência Muscular do Braço (cm)";
        CalfCircumference => "circ_panturrilha", "Circunferência da Panturrilha (cm)";
        WaistCircumference => "circ_cintura", "Circunferência da Cintura (cm)";
        HipCircumference => "circ_quadril", "Circunferência do Quadril (cm)";
        AbdominalCircumference => "circ_abdominal", "Circunferência Abdominal (cm)";
        TricepsSkinfold => "dobra_triceps", "Dobra Cutânea Tricipital (mm)";
        BicepsSkinfold => "dobra_biceps", "Dobra Cutânea Bicipital (mm)";
        SubscapularSkinfold => "dobra_subescapular", "Dobra Cutânea Subescapular (mm)";
        SuprailiacSkinfold => "dobra_suprailiaca", "Dobra Cutânea Suprailiaca (mm)";
        AbdominalSkinfold => "dobra_abdominal", "Dobra Cutânea Abdominal (mm)";
        PectoralSkinfold => "dobra_peitoral", "Dobra Cutânea Peitoral (mm)";
        AxillarySkinfold => "dobra_axilar", "Dobra Cutânea Axilar (mm)";
        BodyFatPercent => "percentual_gordura", "Percentual de Gordura (%)";
    }
}

field_keys! {
    LabTest ("laboratory test") {
        Glucose => "glicemia", "Glicemia (mg/dL)";
        Hemoglobin => "hemoglobina", "Hemoglobina (g/dL)";
        TotalCholesterol => "colesterol_total", "Colesterol Total (mg/dL)";
        Hdl => "hdl", "HDL (mg/dL)";
        Ldl => "ldl", "LDL (mg/dL)";
        Triglycerides => "triglicerideos", "Triglicerídeos (mg/dL)";
        Urea => "ureia", "Ureia (mg/dL)";
        Creatinine => "creatinina", "Creatinina (mg/dL)";
        Albumin => "albumina", "Albumina (g/dL)";
        TotalProtein => "proteinas_totais", "Proteínas Totais (g/dL)";
        Prealbumin => "pre_albumina", "Pré-albumina (mg/dL)";
        Iron => "ferro", "Ferro (µg/dL)";
        Transferrin => "transferrina", "Transferrina (mg/dL)";
        Ferritin => "ferritina", "Ferritina (ng/mL)";
        VitaminB12 => "vitamin_b12", "Vitamina B12 (pg/mL)";
        Folate => "folato", "Folato (ng/mL)";
    }
}

field_keys! {
    /// Follow-up snapshot fields. Values are kept as entered.
    EvolutionField ("evolution field") {
        Weight => "peso_evo", "Peso (kg)";
        Bmi => "imc_evo", "IMC (kg/m²)";
        NutritionalState => "estado_nutri_evo", "Estado Nutricional";
        DietAdherence => "adesao_dieta_evo", "Adesão à Dieta";
        Appetite => "apetite_evo", "Apetite";
        ClinicalProgress => "evolucao_clinica_evo", "Evolução Clínica";
        ArmCircumference => "circ_braco_evo", "Circunferência do Braço (cm)";
        ArmMuscleCircumference => "circ_musc_braco_evo", "Circunferência Muscular do Braço (cm)";
        CalfCircumference => "circ_panturrilha_evo", "Circunferência da Panturrilha (cm)";
        WaistCircumference => "circ_cintura_evo", "Circunferência da Cintura (cm)";
        HipCircumference => "circ_quadril_evo", "Circunferência do Quadril (cm)";
        AbdominalCircumference => "circ_abdominal_evo", "Circunferência Abdominal (cm)";
        TricepsSkinfold => "dobra_triceps_evo", "Dobra Cutânea Tricipital (mm)";
        BicepsSkinfold => "dobra_biceps_evo", "Dobra Cutânea Bicipital (mm)";
        SubscapularSkinfold => "dobra_subescapular_evo", "Dobra Cutânea Subescapular (mm)";
        SuprailiacSkinfold => "dobra_suprailiaca_evo", "Dobra Cutânea Suprailiaca (mm)";
        AbdominalSkinfold => "dobra_abdominal_evo", "Dobra Cutânea Abdominal (mm)";
        PectoralSkinfold => "dobra_peitoral_evo", "Dobra Cutânea Peitoral (mm)";
        AxillarySkinfold => "dobra_axilar_evo", "Dobra Cutânea Axilar (mm)";
        Evaluator => "nome_avaliador_evo", "Avaliador (nome)";
    }
}
