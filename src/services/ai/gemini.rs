//! Gemini-backed implementation of the interview collaborator.
//!
//! Talks to the generateContent endpoint with a blocking client; the
//! whole application runs on one thread and the analyzing stage is its
//! only long wait, so nothing here needs an async runtime.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::{AssessmentReport, DialogueHistory, PatientProfile, TurnOutcome, TurnRole};

use super::prompts;
use super::{InterviewService, ServiceError};

pub struct GeminiInterviewService {
    client: Client,
    model: String,
    endpoint: String,
    temperature: f32,
    api_key: String,
    max_questions: u32,
}

impl GeminiInterviewService {
    pub fn new(config: &AppConfig, api_key: impl Into<String>) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.gemini.timeout_secs))
            .build()
            .map_err(|err| ServiceError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            model: config.gemini.model.clone(),
            endpoint: config.gemini.endpoint.clone(),
            temperature: config.gemini.temperature,
            api_key: api_key.into(),
            max_questions: config.interview.max_questions,
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }

    fn complete(&self, system: String, contents: Vec<Content>) -> Result<String, ServiceError> {
        let body = GenerateContentRequest {
            contents,
            system_instruction: SystemInstruction {
                parts: vec![Part { text: system }],
            },
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(self.request_url())
            .json(&body)
            .send()
            .map_err(|err| ServiceError::Transport(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|err| ServiceError::Transport(err.to_string()))?;
        if !status.is_success() {
            return Err(ServiceError::Transport(format!("HTTP {status}: {text}")));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|err| ServiceError::MalformedResponse(err.to_string()))?;
        if let Some(error) = parsed.error {
            return Err(ServiceError::Declined(error.message));
        }
        parsed
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| ServiceError::Declined("response carried no content".to_string()))
    }
}

impl InterviewService for GeminiInterviewService {
    fn next_turn(
        &self,
        profile: &PatientProfile,
        history: &DialogueHistory,
    ) -> Result<TurnOutcome, ServiceError> {
        // Hard bound on the loop regardless of what the model wants.
        if history.question_count() >= self.max_questions as usize {
            return Ok(TurnOutcome::Complete);
        }
        let system = prompts::interviewer_system_prompt(profile, self.max_questions);
        let reply = self.complete(system, conversation_contents(history))?;
        let reply = reply.trim();
        if prompts::is_completion_signal(reply) {
            Ok(TurnOutcome::Complete)
        } else if reply.is_empty() {
            Err(ServiceError::Declined("empty interviewer reply".to_string()))
        } else {
            Ok(TurnOutcome::Question {
                text: reply.to_string(),
            })
        }
    }

    fn generate_report(
        &self,
        profile: &PatientProfile,
        history: &DialogueHistory,
    ) -> Result<AssessmentReport, ServiceError> {
        let contents = vec![Content::user(prompts::report_user_prompt(profile, history))];
        let reply = self.complete(prompts::report_system_prompt(), contents)?;
        prompts::parse_report(&reply)
    }
}

/// Maps the transcript onto Gemini chat roles: the interviewer's own
/// questions come back as "model" turns, the patient's answers as
/// "user" turns. An opening user turn seeds the very first question.
fn conversation_contents(history: &DialogueHistory) -> Vec<Content> {
    let mut contents = vec![Content::user(
        "Please begin the intake interview.".to_string(),
    )];
    for turn in history.turns() {
        let role = match turn.role {
            TurnRole::Interviewer => "model",
            TurnRole::Patient => "user",
        };
        contents.push(Content {
            role: role.to_string(),
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        });
    }
    contents
}

// generateContent wire format.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: SystemInstruction,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn user(text: String) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part { text }],
        }
    }
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}
