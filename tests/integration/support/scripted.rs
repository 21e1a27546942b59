//! A scripted stand-in for the Gemini collaborator.
//!
//! Plays a fixed list of questions, then either resolves with a canned
//! report or fails, while recording what the session actually handed it.

use std::cell::RefCell;
use std::rc::Rc;

use meditriage::models::{
    AssessmentReport, DialogueHistory, DifferentialDiagnosis, PatientProfile, Sex, TurnOutcome,
    UrgencyLevel, DISCLAIMER,
};
use meditriage::services::ai::{InterviewService, ServiceError};

#[derive(Default)]
struct Inner {
    questions: Vec<String>,
    report: Option<AssessmentReport>,
    fail_turn_at: Option<usize>,
    seen_history: Option<DialogueHistory>,
    report_calls: usize,
}

#[derive(Clone)]
pub struct ScriptedService {
    inner: Rc<RefCell<Inner>>,
}

impl ScriptedService {
    fn with_questions(questions: &[&str]) -> Inner {
        Inner {
            questions: questions.iter().map(|q| q.to_string()).collect(),
            ..Inner::default()
        }
    }

    /// Asks the given questions, then resolves with `report`.
    pub fn resolving(questions: &[&str], report: AssessmentReport) -> Self {
        let mut inner = Self::with_questions(questions);
        inner.report = Some(report);
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Asks the given questions, then fails report generation.
    pub fn rejecting(questions: &[&str]) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Self::with_questions(questions))),
        }
    }

    /// Fails `next_turn` once `index` questions have already been asked.
    pub fn failing_turn_at(questions: &[&str], index: usize) -> Self {
        let mut inner = Self::with_questions(questions);
        inner.fail_turn_at = Some(index);
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// The dialogue history passed to the last `generate_report` call.
    pub fn seen_history(&self) -> Option<DialogueHistory> {
        self.inner.borrow().seen_history.clone()
    }

    pub fn report_calls(&self) -> usize {
        self.inner.borrow().report_calls
    }
}

impl InterviewService for ScriptedService {
    fn next_turn(
        &self,
        _profile: &PatientProfile,
        history: &DialogueHistory,
    ) -> Result<TurnOutcome, ServiceError> {
        let inner = self.inner.borrow();
        let asked = history.question_count();
        if inner.fail_turn_at == Some(asked) {
            return Err(ServiceError::Transport("scripted turn failure".to_string()));
        }
        match inner.questions.get(asked) {
            Some(question) => Ok(TurnOutcome::Question {
                text: question.clone(),
            }),
            None => Ok(TurnOutcome::Complete),
        }
    }

    fn generate_report(
        &self,
        _profile: &PatientProfile,
        history: &DialogueHistory,
    ) -> Result<AssessmentReport, ServiceError> {
        let mut inner = self.inner.borrow_mut();
        inner.report_calls += 1;
        inner.seen_history = Some(history.clone());
        inner
            .report
            .clone()
            .ok_or_else(|| ServiceError::Declined("scripted analysis failure".to_string()))
    }
}

pub fn sample_profile(name: &str) -> PatientProfile {
    PatientProfile::new(name, 41, Sex::Other, "sore throat and fatigue", "4 days")
        .with_allergies(vec!["penicillin".to_string()])
}

pub fn sample_report() -> AssessmentReport {
    AssessmentReport {
        summary: "Findings are most consistent with a viral pharyngitis.".to_string(),
        differential: vec![
            DifferentialDiagnosis {
                condition: "Viral pharyngitis".to_string(),
                likelihood_percent: 55,
                rationale: "Gradual onset without high fever.".to_string(),
            },
            DifferentialDiagnosis {
                condition: "Streptococcal pharyngitis".to_string(),
                likelihood_percent: 25,
                rationale: "Cannot be excluded without a swab.".to_string(),
            },
        ],
        urgency: UrgencyLevel::RoutineVisit,
        recommended_steps: vec!["Arrange a throat swab within a few days".to_string()],
        disclaimer: DISCLAIMER.to_string(),
    }
}
