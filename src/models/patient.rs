use serde::{Deserialize, Serialize};

/// Sex recorded at intake, as reported by the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
    Other,
}

impl Sex {
    pub fn label(&self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
            Sex::Other => "other",
        }
    }
}

/// Intake record captured before any AI interaction.
///
/// Captured once when the intake form is submitted and never mutated for
/// the remainder of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub full_name: String,
    pub age_years: u32,
    pub sex: Sex,
    /// The complaint that brought the patient in, in their own words.
    pub chief_complaint: String,
    /// How long the symptoms have been present ("3 days", "two weeks").
    pub symptom_duration: String,
    #[serde(default)]
    pub preexisting_conditions: Vec<String>,
    #[serde(default)]
    pub current_medications: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl PatientProfile {
    pub fn new(
        full_name: impl Into<String>,
        age_years: u32,
        sex: Sex,
        chief_complaint: impl Into<String>,
        symptom_duration: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            age_years,
            sex,
            chief_complaint: chief_complaint.into(),
            symptom_duration: symptom_duration.into(),
            preexisting_conditions: Vec::new(),
            current_medications: Vec::new(),
            allergies: Vec::new(),
        }
    }

    pub fn with_preexisting_conditions(mut self, conditions: Vec<String>) -> Self {
        self.preexisting_conditions = conditions;
        self
    }

    pub fn with_current_medications(mut self, medications: Vec<String>) -> Self {
        self.current_medications = medications;
        self
    }

    pub fn with_allergies(mut self, allergies: Vec<String>) -> Self {
        self.allergies = allergies;
        self
    }
}
