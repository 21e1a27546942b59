//! The stateful session facade.
//!
//! `TriageSession` owns the single source of truth for a run: the stage
//! machine, the captured profile, the transcript, and the eventual
//! report. All mutation funnels through the pure `apply` function in
//! `state`, so the facade stays a thin layer of wiring between the
//! caller, the AI collaborator, and the diagnostics log.

pub mod state;

pub use state::{apply, SessionEvent, SessionState, Stage, TransitionError};

use anyhow::{bail, Context, Result};
use serde_json::json;
use std::path::Path;
use uuid::Uuid;

use crate::events::{EventType, SessionLog};
use crate::models::{
    AssessmentReport, DialogueHistory, DialogueTurn, PatientProfile, TurnOutcome,
};
use crate::services::ai::InterviewService;

/// User-facing notice shown when report generation fails. The session
/// has already been reset by the time the caller sees it.
pub const ANALYSIS_FAILURE_NOTICE: &str =
    "Something went wrong generating the diagnosis. Please try again.";

/// What came out of the analyzing stage.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The collaborator produced a full report; the session now shows it.
    Completed(AssessmentReport),
    /// The collaborator failed; the session has been reset to intake.
    Failed { notice: String },
}

pub struct TriageSession {
    session_id: Uuid,
    state: SessionState,
    history: DialogueHistory,
    service: Box<dyn InterviewService>,
    log: SessionLog,
}

impl TriageSession {
    /// Creates a session logging under the default workspace root.
    pub fn new(service: Box<dyn InterviewService>) -> Result<Self> {
        let session_id = Uuid::new_v4();
        let log = SessionLog::for_session(session_id)?;
        Ok(Self::assemble(session_id, service, log))
    }

    /// Creates a session logging under an explicit workspace root.
    pub fn with_workspace(root: &Path, service: Box<dyn InterviewService>) -> Self {
        let session_id = Uuid::new_v4();
        let log = SessionLog::in_root(root, session_id);
        Self::assemble(session_id, service, log)
    }

    fn assemble(session_id: Uuid, service: Box<dyn InterviewService>, log: SessionLog) -> Self {
        Self {
            session_id,
            state: SessionState::default(),
            history: DialogueHistory::new(),
            service,
            log,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn profile(&self) -> Option<&PatientProfile> {
        self.state.profile.as_ref()
    }

    pub fn report(&self) -> Option<&AssessmentReport> {
        self.state.report.as_ref()
    }

    pub fn history(&self) -> &DialogueHistory {
        &self.history
    }

    /// Stores the intake profile and enters the interview.
    pub fn submit_intake(&mut self, profile: PatientProfile) -> Result<()> {
        let chief_complaint = profile.chief_complaint.clone();
        self.state = apply(self.state.clone(), SessionEvent::IntakeSubmitted(profile))?;
        self.log.append(
            EventType::IntakeSubmitted,
            json!({ "chief_complaint": chief_complaint }),
        )?;
        Ok(())
    }

    /// Asks the collaborator for its next move: another question for
    /// the patient, or the signal that the interview is over.
    ///
    /// A collaborator failure here leaves the session in the interview
    /// stage with the transcript intact, so the caller may simply try
    /// the turn again.
    pub fn next_question(&mut self) -> Result<TurnOutcome> {
        if self.state.stage != Stage::Interview {
            bail!("No interview is in progress.");
        }
        let profile = self
            .state
            .profile
            .as_ref()
            .context("Interview stage is missing its stored profile")?;
        let outcome = self.service.next_turn(profile, &self.history)?;
        if let TurnOutcome::Question { text } = &outcome {
            self.history.record(DialogueTurn::interviewer(text));
            self.log
                .append(EventType::QuestionAsked, json!({ "question": text }))?;
        }
        Ok(outcome)
    }

    /// Records the patient's answer to the pending question. Legal only
    /// while the interview is running.
    pub fn answer_question(&mut self, answer: &str) -> Result<()> {
        if self.state.stage != Stage::Interview {
            bail!("No interview is in progress.");
        }
        self.history.record(DialogueTurn::patient(answer));
        self.log
            .append(EventType::AnswerRecorded, json!({ "answer": answer }))?;
        Ok(())
    }

    /// Leaves the interview, runs the analysis, and either lands on the
    /// report or resets the whole session on failure.
    ///
    /// The collaborator call is the one long wait in the application;
    /// there is no cancellation once it has started.
    pub fn complete_interview(&mut self) -> Result<AnalysisOutcome> {
        self.state = apply(self.state.clone(), SessionEvent::InterviewCompleted)?;
        self.log.append(
            EventType::InterviewCompleted,
            json!({ "turns": self.history.len() }),
        )?;
        self.log.append(
            EventType::AnalysisStarted,
            json!({ "questions_asked": self.history.question_count() }),
        )?;

        let profile = self
            .state
            .profile
            .as_ref()
            .context("Analyzing stage is missing its stored profile")?;
        match self.service.generate_report(profile, &self.history) {
            Ok(report) => {
                self.state = apply(
                    self.state.clone(),
                    SessionEvent::AnalysisSucceeded(report.clone()),
                )?;
                self.log.append(
                    EventType::ReportGenerated,
                    json!({
                        "urgency": report.urgency,
                        "differential_count": report.differential.len(),
                    }),
                )?;
                Ok(AnalysisOutcome::Completed(report))
            }
            Err(err) => {
                self.state = apply(self.state.clone(), SessionEvent::AnalysisFailed)?;
                self.history.clear();
                self.log.append(
                    EventType::AnalysisFailed,
                    json!({ "kind": err.kind(), "error": err.to_string() }),
                )?;
                Ok(AnalysisOutcome::Failed {
                    notice: ANALYSIS_FAILURE_NOTICE.to_string(),
                })
            }
        }
    }

    /// Returns to intake from any stage, discarding profile, report,
    /// and transcript.
    pub fn reset(&mut self) -> Result<()> {
        self.state = apply(self.state.clone(), SessionEvent::Reset)?;
        self.history.clear();
        self.log.append(EventType::SessionReset, json!({}))?;
        Ok(())
    }
}
