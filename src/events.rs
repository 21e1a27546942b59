//! Append-only diagnostics log for triage sessions.
//!
//! Every stage transition and interview turn is appended as one JSONL
//! record under the workspace's sessions directory. The log is written
//! for troubleshooting only; nothing in the application reads it back
//! to restore state.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config;

/// Session happenings worth a diagnostics record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    IntakeSubmitted,
    QuestionAsked,
    AnswerRecorded,
    InterviewCompleted,
    AnalysisStarted,
    ReportGenerated,
    AnalysisFailed,
    SessionReset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEventRecord {
    pub event_id: Uuid,
    pub session_id: Uuid,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub details: serde_json::Value,
}

/// Wraps the JSONL log file for one session.
pub struct SessionLog {
    session_id: Uuid,
    events_path: PathBuf,
}

impl SessionLog {
    /// Opens the log under the default workspace root.
    pub fn for_session(session_id: Uuid) -> Result<Self> {
        Ok(Self::in_root(&config::workspace_root()?, session_id))
    }

    /// Opens the log under an explicit root; used by tests and tooling.
    pub fn in_root(root: &Path, session_id: Uuid) -> Self {
        let events_path = root
            .join("sessions")
            .join(session_id.to_string())
            .join("events.jsonl");
        Self {
            session_id,
            events_path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.events_path
    }

    pub fn append(&self, event_type: EventType, details: serde_json::Value) -> Result<()> {
        let record = SessionEventRecord {
            event_id: Uuid::new_v4(),
            session_id: self.session_id,
            event_type,
            timestamp: Utc::now(),
            details,
        };
        if let Some(parent) = self.events_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.events_path)
            .with_context(|| format!("Failed to open session log {}", self.events_path.display()))?;
        file.write_all(serde_json::to_string(&record)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    pub fn load_events(&self) -> Result<Vec<SessionEventRecord>> {
        if !self.events_path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.events_path)?;
        let mut events = Vec::new();
        for line in data.lines().filter(|line| !line.trim().is_empty()) {
            let record: SessionEventRecord = serde_json::from_str(line)?;
            events.push(record);
        }
        Ok(events)
    }
}
