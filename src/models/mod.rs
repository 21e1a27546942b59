mod dialogue;
mod patient;
mod report;

pub use dialogue::{DialogueHistory, DialogueTurn, TurnOutcome, TurnRole};
pub use patient::{PatientProfile, Sex};
pub use report::{AssessmentReport, DifferentialDiagnosis, UrgencyLevel, DISCLAIMER};
