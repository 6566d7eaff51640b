//! Append-only engine event log.
//!
//! One JSONL file of typed events with structured payloads, for observing
//! matching runs, skipped candidates, recommendation batches, and feedback
//! appends after the fact.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EngineEventType {
    MatchSearchCompleted,
    CandidateSkipped,
    RecommendationsGenerated,
    FeedbackRecorded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineEvent {
    pub event_id: Uuid,
    pub event_type: EngineEventType,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub details: serde_json::Value,
}

pub struct EngineEventLog {
    path: PathBuf,
}

impl EngineEventLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join("engine_events.jsonl"),
        }
    }

    pub fn append(&self, event_type: EngineEventType, details: serde_json::Value) -> Result<Uuid> {
        let event = EngineEvent {
            event_id: Uuid::new_v4(),
            event_type,
            timestamp: Utc::now(),
            details,
        };
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create event log directory {:?}", dir))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open event log {:?}", self.path))?;
        file.write_all(serde_json::to_string(&event)?.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(event.event_id)
    }

    pub fn load_events(&self) -> Result<Vec<EngineEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read event log {:?}", self.path))?;
        let mut events = Vec::new();
        for line in data.lines().filter(|line| !line.trim().is_empty()) {
            let event: EngineEvent = serde_json::from_str(line)
                .with_context(|| format!("Failed to parse event log line in {:?}", self.path))?;
            events.push(event);
        }
        Ok(events)
    }
}
