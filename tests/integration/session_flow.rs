use anyhow::Result;
use meditriage::models::TurnOutcome;
use meditriage::session::AnalysisOutcome;
use meditriage::Stage;

use crate::support::scripted::{sample_profile, sample_report, ScriptedService};
use crate::IntegrationHarness;

#[test]
fn full_run_lands_on_the_report() -> Result<()> {
    let harness = IntegrationHarness::new();
    let service = ScriptedService::resolving(
        &["When did the symptoms start?", "Any fever or chills?"],
        sample_report(),
    );
    let mut session = harness.session(Box::new(service.clone()));

    let profile = sample_profile("Priya Nair");
    session.submit_intake(profile.clone())?;
    assert_eq!(session.stage(), Stage::Interview);
    assert_eq!(session.profile(), Some(&profile));

    let mut answers = ["Four days ago.", "No fever."].iter();
    loop {
        match session.next_question()? {
            TurnOutcome::Question { text } => {
                assert!(!text.is_empty());
                session.answer_question(answers.next().expect("ran out of scripted answers"))?;
            }
            TurnOutcome::Complete => break,
        }
    }
    assert_eq!(session.history().len(), 4);

    let outcome = session.complete_interview()?;
    assert_eq!(outcome, AnalysisOutcome::Completed(sample_report()));
    assert_eq!(session.stage(), Stage::Report);
    assert_eq!(session.profile(), Some(&profile));
    assert_eq!(session.report(), Some(&sample_report()));

    // The collaborator saw the transcript exactly as the session holds it.
    let seen = service.seen_history().expect("report call should record history");
    assert_eq!(&seen, session.history());
    Ok(())
}

#[test]
fn reset_after_report_returns_to_a_blank_intake() -> Result<()> {
    let harness = IntegrationHarness::new();
    let service = ScriptedService::resolving(&["Only question?"], sample_report());
    let mut session = harness.session(Box::new(service));

    session.submit_intake(sample_profile("Tomas Vera"))?;
    assert!(matches!(
        session.next_question()?,
        TurnOutcome::Question { .. }
    ));
    session.answer_question("Just today.")?;
    assert_eq!(session.next_question()?, TurnOutcome::Complete);
    assert!(matches!(
        session.complete_interview()?,
        AnalysisOutcome::Completed(_)
    ));

    session.reset()?;
    assert_eq!(session.stage(), Stage::Intake);
    assert_eq!(session.profile(), None);
    assert_eq!(session.report(), None);
    assert!(session.history().is_empty());
    Ok(())
}
