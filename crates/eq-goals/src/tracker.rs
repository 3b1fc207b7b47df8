// tracker.rs — GoalTracker: the ordered goal list, score and level.
//
// Recording a goal feeds its score delta into the tracker; after every
// positive delta the level jumps to `score / level_step + 1` if that is
// higher, saturating at `u32::MAX`. Save and load go through the flat text codec in
// `codec.rs` and always move the whole state at once.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;

use crate::codec;
use crate::config::{QuestConfig, DEFAULT_LEVEL_STEP};
use crate::error::GoalError;
use crate::events::{EventDispatcher, LogSink, NotificationSink, QuestEvent};
use crate::goal::Goal;

/// Levels crossed by one award beyond which a single LevelUp is emitted.
const MAX_LEVEL_EVENTS: u32 = 16;

/// Summary of one record call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordReport {
    /// Net score change.
    pub points: i64,
    /// Positions (0-based) of goals that reached done during this call.
    pub completed: Vec<usize>,
    /// Levels reached during this call, in order. An award that crosses more
    /// than a handful of bands contributes only its final level.
    pub levels_reached: Vec<u32>,
}

/// Owns the goals and the running score.
pub struct GoalTracker {
    goals: Vec<Goal>,
    score: i64,
    level: u32,
    level_step: u32,
    dispatcher: EventDispatcher,
}

impl GoalTracker {
    /// An empty tracker at level 1 with the default level step.
    pub fn new() -> Self {
        Self {
            goals: Vec::new(),
            score: 0,
            level: 1,
            level_step: DEFAULT_LEVEL_STEP,
            dispatcher: EventDispatcher::new(),
        }
    }

    /// An empty tracker whose levels are `level_step` points apart.
    pub fn with_level_step(level_step: u32) -> Result<Self, GoalError> {
        if level_step == 0 {
            return Err(GoalError::InvalidArgument(
                "level step must be positive".to_string(),
            ));
        }
        Ok(Self {
            level_step,
            ..Self::new()
        })
    }

    /// An empty tracker using the configured level step and event log.
    pub fn from_config(config: &QuestConfig) -> Result<Self, GoalError> {
        let mut tracker = Self::with_level_step(config.level_step)?;
        tracker.add_sink(Box::new(LogSink::new(&config.events_log)));
        Ok(tracker)
    }

    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.dispatcher.add_sink(sink);
    }

    /// Append a goal. Returns its 0-based position.
    pub fn add_goal(&mut self, goal: Goal) -> usize {
        let index = self.goals.len();
        self.dispatcher.dispatch(&QuestEvent::GoalAdded {
            index,
            description: goal.description().to_string(),
            timestamp: Utc::now(),
        });
        self.goals.push(goal);
        index
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn goal(&self, index: usize) -> Option<&Goal> {
        self.goals.get(index)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn level_step(&self) -> u32 {
        self.level_step
    }

    /// One numbered line per goal, in insertion order.
    pub fn display_goals(&self) -> Vec<String> {
        self.goals
            .iter()
            .enumerate()
            .map(|(i, goal)| format!("{}. {}", i + 1, goal))
            .collect()
    }

    /// Record every goal once, in insertion order.
    pub fn record_goals(&mut self) -> RecordReport {
        let mut report = RecordReport::default();
        for index in 0..self.goals.len() {
            self.record_at(index, &mut report);
        }
        report
    }

    /// Record the goal at `index` (0-based).
    pub fn record_goal(&mut self, index: usize) -> Result<RecordReport, GoalError> {
        if index >= self.goals.len() {
            return Err(GoalError::NotFound(index));
        }
        let mut report = RecordReport::default();
        self.record_at(index, &mut report);
        Ok(report)
    }

    fn record_at(&mut self, index: usize, report: &mut RecordReport) {
        let goal = &mut self.goals[index];
        let outcome = goal.record();
        tracing::debug!(
            index,
            description = goal.description(),
            points = outcome.points,
            completed = outcome.completed,
            "recorded goal"
        );

        if outcome.points != 0 {
            self.dispatcher.dispatch(&QuestEvent::GoalRecorded {
                index,
                description: goal.description().to_string(),
                points: outcome.points,
                timestamp: Utc::now(),
            });
        }
        if outcome.completed {
            self.dispatcher.dispatch(&QuestEvent::GoalCompleted {
                index,
                description: goal.description().to_string(),
                point_value: goal.point_value(),
                timestamp: Utc::now(),
            });
            report.completed.push(index);
        }

        self.score = self.score.saturating_add(outcome.points);
        report.points = report.points.saturating_add(outcome.points);
        if outcome.points > 0 {
            self.apply_level_ups(report);
        }
    }

    fn apply_level_ups(&mut self, report: &mut RecordReport) {
        let target = self.score / i64::from(self.level_step) + 1;
        if target <= i64::from(self.level) {
            return;
        }
        let target = u32::try_from(target).unwrap_or(u32::MAX);
        if target == self.level {
            return;
        }

        let from = self.level;
        self.level = target;
        tracing::info!(from, level = target, score = self.score, "level up");

        let first = if target - from > MAX_LEVEL_EVENTS {
            target
        } else {
            from + 1
        };
        for level in first..=target {
            self.dispatcher
                .dispatch(&QuestEvent::level_up(level, self.score));
            report.levels_reached.push(level);
        }
    }

    /// Write score, level and every goal to `path`, replacing the file.
    pub fn save_goals(&self, path: impl AsRef<Path>) -> Result<(), GoalError> {
        let path = path.as_ref();
        let io_err = |source| GoalError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| GoalError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let text = codec::encode_snapshot(self.score, self.level, &self.goals);
        let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
        writer.write_all(text.as_bytes()).map_err(io_err)?;
        writer.flush().map_err(io_err)?;

        tracing::debug!(path = %path.display(), goals = self.goals.len(), "saved goals");
        self.dispatcher.dispatch(&QuestEvent::GoalsSaved {
            path: path.display().to_string(),
            goal_count: self.goals.len(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Replace score, level and goals with the contents of `path`.
    ///
    /// The whole file is decoded before anything is replaced, so a failed
    /// load leaves the tracker as it was.
    pub fn load_goals(&mut self, path: impl AsRef<Path>) -> Result<(), GoalError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GoalError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let snapshot = codec::decode_snapshot(&text)?;

        self.score = snapshot.score;
        self.level = snapshot.level;
        self.goals = snapshot.goals;

        tracing::debug!(path = %path.display(), goals = self.goals.len(), "loaded goals");
        self.dispatcher.dispatch(&QuestEvent::GoalsLoaded {
            path: path.display().to_string(),
            goal_count: self.goals.len(),
            timestamp: Utc::now(),
        });
        Ok(())
    }
}

impl Default for GoalTracker {
    fn default() -> Self {
        Self::new()
    }
}
