//! Contract with the AI collaborator that runs the interview and writes
//! the assessment.
//!
//! The session only ever sees this trait; the Gemini implementation
//! lives behind it. Every call receives the profile and the full
//! transcript so implementations stay stateless between turns.

mod gemini;
mod prompts;

pub use gemini::GeminiInterviewService;

use thiserror::Error;

use crate::models::{AssessmentReport, DialogueHistory, PatientProfile, TurnOutcome};

/// Failure kinds raised by an interview collaborator.
///
/// Callers currently treat every kind the same way, but the split keeps
/// diagnostics readable and leaves room to differentiate later.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
    #[error("service declined the request: {0}")]
    Declined(String),
}

impl ServiceError {
    /// Short machine-readable tag used in the diagnostics log.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Transport(_) => "transport",
            ServiceError::MalformedResponse(_) => "malformed_response",
            ServiceError::Declined(_) => "declined",
        }
    }
}

/// The two operations the session consumes from the collaborator.
pub trait InterviewService {
    /// Returns the next question to put to the patient, or the signal
    /// that enough has been gathered.
    fn next_turn(
        &self,
        profile: &PatientProfile,
        history: &DialogueHistory,
    ) -> Result<TurnOutcome, ServiceError>;

    /// Produces the final assessment from the profile and the full
    /// transcript. Fails outright rather than returning a partial
    /// report.
    fn generate_report(
        &self,
        profile: &PatientProfile,
        history: &DialogueHistory,
    ) -> Result<AssessmentReport, ServiceError>;
}
