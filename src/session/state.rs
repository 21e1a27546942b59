//! Pure stage-transition logic for a triage session.
//!
//! The session lifecycle is a small cyclic machine: intake feeds the
//! interview, the interview feeds analysis, analysis either produces a
//! report or throws the whole session away. Keeping the transition
//! function free of I/O lets it be tested exhaustively on its own.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AssessmentReport, PatientProfile};

/// One discrete phase of the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Intake,
    Interview,
    Analyzing,
    Report,
}

/// Everything the session holds: the active stage plus the data that
/// stage is entitled to.
///
/// The accompanying invariants: `Report` implies both profile and report
/// are present, `Interview` and `Analyzing` imply a profile, `Intake`
/// implies neither.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub stage: Stage,
    pub profile: Option<PatientProfile>,
    pub report: Option<AssessmentReport>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            stage: Stage::Intake,
            profile: None,
            report: None,
        }
    }
}

/// Inputs that move the session between stages.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    IntakeSubmitted(PatientProfile),
    InterviewCompleted,
    AnalysisSucceeded(AssessmentReport),
    AnalysisFailed,
    Reset,
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            SessionEvent::IntakeSubmitted(_) => "intake submission",
            SessionEvent::InterviewCompleted => "interview completion",
            SessionEvent::AnalysisSucceeded(_) => "analysis success",
            SessionEvent::AnalysisFailed => "analysis failure",
            SessionEvent::Reset => "reset",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("{event} is not valid while the session is in the {stage:?} stage")]
    IllegalTransition { stage: Stage, event: &'static str },
}

/// Applies one event to the current state, returning the next state.
///
/// Analysis failure is a full reset, not a retry: whatever profile and
/// dialogue had accumulated is discarded along with the stage.
pub fn apply(state: SessionState, event: SessionEvent) -> Result<SessionState, TransitionError> {
    match (state.stage, event) {
        (Stage::Intake, SessionEvent::IntakeSubmitted(profile)) => Ok(SessionState {
            stage: Stage::Interview,
            profile: Some(profile),
            report: None,
        }),
        (Stage::Interview, SessionEvent::InterviewCompleted) => Ok(SessionState {
            stage: Stage::Analyzing,
            ..state
        }),
        (Stage::Analyzing, SessionEvent::AnalysisSucceeded(report)) => Ok(SessionState {
            stage: Stage::Report,
            profile: state.profile,
            report: Some(report),
        }),
        (Stage::Analyzing, SessionEvent::AnalysisFailed) => Ok(SessionState::default()),
        (_, SessionEvent::Reset) => Ok(SessionState::default()),
        (stage, event) => Err(TransitionError::IllegalTransition {
            stage,
            event: event.name(),
        }),
    }
}
