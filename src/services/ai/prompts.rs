//! Prompt construction and response parsing for the Gemini collaborator.

use std::fmt::Write;

use crate::models::{AssessmentReport, DialogueHistory, PatientProfile, TurnRole};

use super::ServiceError;

/// Token the interviewer emits instead of a question once it has enough
/// material for an assessment.
pub(crate) const COMPLETION_SENTINEL: &str = "INTERVIEW_COMPLETE";

pub(crate) fn interviewer_system_prompt(profile: &PatientProfile, max_questions: u32) -> String {
    format!(
        "You are a careful clinical intake interviewer. You are interviewing the patient \
         described below to gather enough detail for a preliminary differential diagnosis.\n\n\
         {}\n\
         Ask exactly one short, plain-language question per reply and nothing else. \
         Never diagnose or give advice during the interview. \
         Ask at most {max_questions} questions in total; once you have enough material, or the \
         limit is reached, reply with exactly {COMPLETION_SENTINEL} on its own.",
        render_profile(profile)
    )
}

pub(crate) fn report_system_prompt() -> String {
    String::from(
        "You are a clinical reasoning assistant. Given a patient profile and an intake \
         interview transcript, produce a preliminary assessment as a single JSON object \
         and nothing else, matching this shape exactly:\n\
         {\n\
           \"summary\": string,\n\
           \"differential\": [{\"condition\": string, \"likelihood_percent\": integer 0-100, \"rationale\": string}],\n\
           \"urgency\": one of \"self_care\" | \"routine_visit\" | \"urgent\" | \"emergency\",\n\
           \"recommended_steps\": [string]\n\
         }\n\
         List the differential from most to least likely. Do not add fields, prose, or \
         markdown outside the JSON object.",
    )
}

pub(crate) fn report_user_prompt(profile: &PatientProfile, history: &DialogueHistory) -> String {
    format!(
        "{}\n{}",
        render_profile(profile),
        render_transcript(history)
    )
}

pub(crate) fn render_profile(profile: &PatientProfile) -> String {
    let mut out = String::from("Patient profile:\n");
    let _ = writeln!(out, "- Name: {}", profile.full_name);
    let _ = writeln!(out, "- Age: {}", profile.age_years);
    let _ = writeln!(out, "- Sex: {}", profile.sex.label());
    let _ = writeln!(out, "- Chief complaint: {}", profile.chief_complaint);
    let _ = writeln!(out, "- Symptom duration: {}", profile.symptom_duration);
    let _ = writeln!(
        out,
        "- Pre-existing conditions: {}",
        join_or_none(&profile.preexisting_conditions)
    );
    let _ = writeln!(
        out,
        "- Current medications: {}",
        join_or_none(&profile.current_medications)
    );
    let _ = writeln!(out, "- Allergies: {}", join_or_none(&profile.allergies));
    out
}

pub(crate) fn render_transcript(history: &DialogueHistory) -> String {
    if history.is_empty() {
        return "Interview transcript: (no questions were asked)\n".to_string();
    }
    let mut out = String::from("Interview transcript:\n");
    for turn in history.turns() {
        let speaker = match turn.role {
            TurnRole::Interviewer => "Interviewer",
            TurnRole::Patient => "Patient",
        };
        let _ = writeln!(out, "{speaker}: {}", turn.text);
    }
    out
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none reported".to_string()
    } else {
        items.join(", ")
    }
}

/// True when the model signalled the end of the interview rather than
/// asking another question.
pub(crate) fn is_completion_signal(reply: &str) -> bool {
    reply.contains(COMPLETION_SENTINEL)
}

/// Parses model output into a report, tolerating a fenced code block
/// around the JSON. Anything structurally incomplete is rejected so a
/// partial report never reaches the session.
pub(crate) fn parse_report(raw: &str) -> Result<AssessmentReport, ServiceError> {
    let payload = extract_json_fence(raw).unwrap_or_else(|| raw.trim().to_string());
    let report: AssessmentReport = serde_json::from_str(&payload)
        .map_err(|err| ServiceError::MalformedResponse(format!("invalid report JSON: {err}")))?;
    if !report.is_complete() {
        return Err(ServiceError::MalformedResponse(
            "report is missing its summary or differential".to_string(),
        ));
    }
    Ok(report)
}

fn extract_json_fence(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let start = trimmed.find("```")?;
    let after_start = &trimmed[start + 3..];
    let after_lang = if let Some(pos) = after_start.find('\n') {
        &after_start[pos + 1..]
    } else {
        return None;
    };
    let end = after_lang.rfind("```")?;
    let candidate = after_lang[..end].trim();
    if candidate.starts_with('{') || candidate.starts_with('[') {
        Some(candidate.to_string())
    } else {
        None
    }
}
