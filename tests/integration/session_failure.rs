use anyhow::Result;
use meditriage::models::TurnOutcome;
use meditriage::session::{AnalysisOutcome, ANALYSIS_FAILURE_NOTICE};
use meditriage::Stage;

use crate::support::scripted::{sample_profile, ScriptedService};
use crate::IntegrationHarness;

#[test]
fn analysis_failure_notifies_once_and_resets_everything() -> Result<()> {
    let harness = IntegrationHarness::new();
    let service = ScriptedService::rejecting(&["Where does it hurt?"]);
    let mut session = harness.session(Box::new(service.clone()));

    session.submit_intake(sample_profile("Lena Osei"))?;
    assert!(matches!(
        session.next_question()?,
        TurnOutcome::Question { .. }
    ));
    session.answer_question("In my lower back.")?;
    assert_eq!(session.next_question()?, TurnOutcome::Complete);

    let outcome = session.complete_interview()?;
    assert_eq!(
        outcome,
        AnalysisOutcome::Failed {
            notice: ANALYSIS_FAILURE_NOTICE.to_string()
        }
    );
    assert_eq!(service.report_calls(), 1);

    // Full-state reset: nothing of the run survives.
    assert_eq!(session.stage(), Stage::Intake);
    assert_eq!(session.profile(), None);
    assert_eq!(session.report(), None);
    assert!(session.history().is_empty());

    // The stage guard refuses a second completion attempt.
    assert!(session.complete_interview().is_err());
    assert_eq!(service.report_calls(), 1);
    Ok(())
}

#[test]
fn turn_failure_leaves_the_interview_intact() -> Result<()> {
    let harness = IntegrationHarness::new();
    let service = ScriptedService::failing_turn_at(&["First question?"], 1);
    let mut session = harness.session(Box::new(service));

    let profile = sample_profile("Ivo Brandt");
    session.submit_intake(profile.clone())?;
    assert!(matches!(
        session.next_question()?,
        TurnOutcome::Question { .. }
    ));
    session.answer_question("Since last weekend.")?;

    // The second fetch fails; the session stays where it was.
    assert!(session.next_question().is_err());
    assert_eq!(session.stage(), Stage::Interview);
    assert_eq!(session.profile(), Some(&profile));
    assert_eq!(session.history().len(), 2);

    // Retrying changes nothing further.
    assert!(session.next_question().is_err());
    assert_eq!(session.history().len(), 2);
    Ok(())
}
