use anyhow::Result;
use meditriage::events::{EventType, SessionLog};
use meditriage::models::TurnOutcome;
use meditriage::session::AnalysisOutcome;

use crate::support::scripted::{sample_profile, sample_report, ScriptedService};
use crate::IntegrationHarness;

#[test]
fn a_full_run_is_journaled_in_order() -> Result<()> {
    let harness = IntegrationHarness::new();
    let service = ScriptedService::resolving(&["How bad is the pain?"], sample_report());
    let mut session = harness.session(Box::new(service));

    session.submit_intake(sample_profile("Keiko Tan"))?;
    assert!(matches!(
        session.next_question()?,
        TurnOutcome::Question { .. }
    ));
    session.answer_question("About a six out of ten.")?;
    assert_eq!(session.next_question()?, TurnOutcome::Complete);
    assert!(matches!(
        session.complete_interview()?,
        AnalysisOutcome::Completed(_)
    ));

    let log = SessionLog::in_root(harness.workspace_path(), session.session_id());
    let types: Vec<EventType> = log
        .load_events()?
        .into_iter()
        .map(|record| record.event_type)
        .collect();
    assert_eq!(
        types,
        vec![
            EventType::IntakeSubmitted,
            EventType::QuestionAsked,
            EventType::AnswerRecorded,
            EventType::InterviewCompleted,
            EventType::AnalysisStarted,
            EventType::ReportGenerated,
        ]
    );
    Ok(())
}

#[test]
fn failures_are_journaled_with_kind_and_detail() -> Result<()> {
    let harness = IntegrationHarness::new();
    let service = ScriptedService::rejecting(&[]);
    let mut session = harness.session(Box::new(service));

    session.submit_intake(sample_profile("Omar Said"))?;
    assert_eq!(session.next_question()?, TurnOutcome::Complete);
    assert!(matches!(
        session.complete_interview()?,
        AnalysisOutcome::Failed { .. }
    ));

    let log = SessionLog::in_root(harness.workspace_path(), session.session_id());
    let events = log.load_events()?;
    let failure = events
        .iter()
        .find(|record| record.event_type == EventType::AnalysisFailed)
        .expect("failure should be journaled");
    assert_eq!(failure.details["kind"], "declined");
    assert!(failure.details["error"]
        .as_str()
        .expect("error detail should be a string")
        .contains("scripted analysis failure"));

    // The reset that follows the failure is part of the same journal.
    assert!(events
        .iter()
        .all(|record| record.event_type != EventType::ReportGenerated));
    Ok(())
}
