use serde::{Deserialize, Serialize};

/// Fixed notice attached to every generated assessment.
pub const DISCLAIMER: &str =
    "This assessment was generated by an AI system for research purposes and is not medical advice.";

/// Triage urgency attached to an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    SelfCare,
    RoutineVisit,
    Urgent,
    Emergency,
}

impl UrgencyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            UrgencyLevel::SelfCare => "self-care at home",
            UrgencyLevel::RoutineVisit => "routine visit with a clinician",
            UrgencyLevel::Urgent => "urgent care within 24 hours",
            UrgencyLevel::Emergency => "emergency care now",
        }
    }
}

/// One candidate condition in the differential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentialDiagnosis {
    pub condition: String,
    /// Rough likelihood as a percentage, 0-100.
    pub likelihood_percent: u8,
    pub rationale: String,
}

/// Structured assessment produced at the end of a session.
///
/// Produced whole or not at all: a report missing its summary or its
/// differential never leaves the adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub summary: String,
    pub differential: Vec<DifferentialDiagnosis>,
    pub urgency: UrgencyLevel,
    #[serde(default)]
    pub recommended_steps: Vec<String>,
    #[serde(default = "default_disclaimer")]
    pub disclaimer: String,
}

fn default_disclaimer() -> String {
    DISCLAIMER.to_string()
}

impl AssessmentReport {
    /// Whether the report carries everything a rendered assessment needs.
    pub fn is_complete(&self) -> bool {
        !self.summary.trim().is_empty()
            && !self.differential.is_empty()
            && self
                .differential
                .iter()
                .all(|entry| !entry.condition.trim().is_empty())
    }
}
