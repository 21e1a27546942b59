//! Interview transcript types.
//!
//! The dialogue history is owned by the session and handed to the AI
//! collaborator on every call, so the collaborator never has to carry
//! hidden conversational state between turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    Interviewer,
    Patient,
}

/// A single utterance in the interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueTurn {
    pub turn_id: Uuid,
    pub role: TurnRole,
    pub text: String,
    pub recorded_at: DateTime<Utc>,
}

impl DialogueTurn {
    fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            turn_id: Uuid::new_v4(),
            role,
            text: text.into(),
            recorded_at: Utc::now(),
        }
    }

    pub fn interviewer(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Interviewer, text)
    }

    pub fn patient(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Patient, text)
    }
}

/// Ordered interview transcript, oldest turn first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueHistory {
    turns: Vec<DialogueTurn>,
}

impl DialogueHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, turn: DialogueTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[DialogueTurn] {
        &self.turns
    }

    /// Number of questions the interviewer has asked so far.
    pub fn question_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|turn| turn.role == TurnRole::Interviewer)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

/// What the collaborator wants to happen next in the interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// Ask the patient this question next.
    Question { text: String },
    /// Enough has been gathered; the interview is over.
    Complete,
}
