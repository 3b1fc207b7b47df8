// events.rs — Event model and notification dispatch.
//
// The tracker emits events when goals are added, recorded or completed,
// when the level goes up, and when the goal file is saved or loaded.
// Sinks (a JSONL log, the CLI's level-up banner, test collectors) subscribe
// through the dispatcher. Dispatch is synchronous.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Events emitted by the tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum QuestEvent {
    /// A goal was appended to the tracker.
    GoalAdded {
        index: usize,
        description: String,
        timestamp: DateTime<Utc>,
    },

    /// A goal was recorded and changed the score.
    GoalRecorded {
        index: usize,
        description: String,
        points: i64,
        timestamp: DateTime<Utc>,
    },

    /// A goal moved to done.
    GoalCompleted {
        index: usize,
        description: String,
        point_value: u32,
        timestamp: DateTime<Utc>,
    },

    /// The score crossed the next level threshold.
    LevelUp {
        level: u32,
        score: i64,
        timestamp: DateTime<Utc>,
    },

    /// The goal file was written.
    GoalsSaved {
        path: String,
        goal_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// The goal file was read back.
    GoalsLoaded {
        path: String,
        goal_count: usize,
        timestamp: DateTime<Utc>,
    },
}

impl QuestEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            QuestEvent::GoalAdded { .. } => "goal_added",
            QuestEvent::GoalRecorded { .. } => "goal_recorded",
            QuestEvent::GoalCompleted { .. } => "goal_completed",
            QuestEvent::LevelUp { .. } => "level_up",
            QuestEvent::GoalsSaved { .. } => "goals_saved",
            QuestEvent::GoalsLoaded { .. } => "goals_loaded",
        }
    }

    pub fn level_up(level: u32, score: i64) -> Self {
        QuestEvent::LevelUp {
            level,
            score,
            timestamp: Utc::now(),
        }
    }
}

/// Trait for receiving tracker events.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged but don't stop the tracker.
    fn send(&self, event: &QuestEvent) -> Result<(), GoalError>;
}

/// Logs events as JSONL to a file.
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &QuestEvent) -> Result<(), GoalError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| GoalError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| GoalError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| GoalError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Dispatches events to multiple sinks.
///
/// A failing sink is logged via tracing and skipped; the others still
/// receive the event.
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    pub fn dispatch(&self, event: &QuestEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!("notification sink error: {}", e);
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
