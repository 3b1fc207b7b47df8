// goal.rs — Goal: one trackable objective and its recording state machine.
//
// Every goal shares a description, a point value and a done flag. The
// variant decides what recording does:
//   Simple    pending → done on the first record
//   Eternal   never done, so never scores
//   Checklist progress += 1, done at target with the bonus added once
//   Negative  pending → done on the first record, costs its points
//
// Done is terminal for every variant that can reach it.

use std::fmt;

use serde::Serialize;

use crate::error::GoalError;

/// Field delimiter of the goal file. Descriptions may not contain it.
pub const FIELD_DELIMITER: char = '|';

/// Variant-specific state of a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalKind {
    Simple,
    Eternal,
    Checklist {
        target_count: u32,
        current_progress: u32,
        bonus_points: u32,
    },
    Negative,
}

/// What a single record did to a goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Score delta earned by this record. Negative goals cost points.
    pub points: i64,
    /// True only on the record that moved the goal to done.
    pub completed: bool,
}

/// A trackable objective.
///
/// Fields are private so the constructor rules hold for every live goal:
/// a non-empty single-line description without the field delimiter, a
/// positive point value, and (for checklists) a positive target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Goal {
    description: String,
    point_value: u32,
    is_done: bool,
    #[serde(flatten)]
    kind: GoalKind,
}

impl Goal {
    /// A goal completed by a single record.
    pub fn simple(description: impl Into<String>, points: u32) -> Result<Self, GoalError> {
        Self::build(description.into(), points, GoalKind::Simple)
    }

    /// A goal that is never finished. Recording it changes nothing.
    pub fn eternal(description: impl Into<String>, points: u32) -> Result<Self, GoalError> {
        Self::build(description.into(), points, GoalKind::Eternal)
    }

    /// A goal that must be recorded `target_count` times. Completing it adds
    /// `bonus_points` to its point value.
    pub fn checklist(
        description: impl Into<String>,
        points: u32,
        target_count: u32,
        bonus_points: u32,
    ) -> Result<Self, GoalError> {
        if target_count == 0 {
            return Err(GoalError::InvalidArgument(
                "checklist target must be at least 1".to_string(),
            ));
        }
        Self::build(
            description.into(),
            points,
            GoalKind::Checklist {
                target_count,
                current_progress: 0,
                bonus_points,
            },
        )
    }

    /// A habit to avoid. Recording it marks an infraction.
    pub fn negative(description: impl Into<String>, points: u32) -> Result<Self, GoalError> {
        Self::build(description.into(), points, GoalKind::Negative)
    }

    fn build(description: String, point_value: u32, kind: GoalKind) -> Result<Self, GoalError> {
        validate_description(&description)?;
        if point_value == 0 {
            return Err(GoalError::InvalidArgument(
                "point value must be positive".to_string(),
            ));
        }
        Ok(Self {
            description,
            point_value,
            is_done: false,
            kind,
        })
    }

    /// Rebuild a goal from persisted state, checking that the pieces agree.
    pub(crate) fn restore(
        description: String,
        point_value: u32,
        is_done: bool,
        kind: GoalKind,
    ) -> Result<Self, GoalError> {
        match &kind {
            GoalKind::Eternal if is_done => {
                return Err(GoalError::InvalidArgument(
                    "an eternal goal cannot be done".to_string(),
                ));
            }
            GoalKind::Checklist {
                target_count,
                current_progress,
                ..
            } => {
                if *target_count == 0 {
                    return Err(GoalError::InvalidArgument(
                        "checklist target must be at least 1".to_string(),
                    ));
                }
                if current_progress > target_count {
                    return Err(GoalError::InvalidArgument(format!(
                        "checklist progress {current_progress} exceeds target {target_count}"
                    )));
                }
                if is_done != (current_progress == target_count) {
                    return Err(GoalError::InvalidArgument(format!(
                        "checklist done flag {is_done} disagrees with progress {current_progress}/{target_count}"
                    )));
                }
            }
            _ => {}
        }
        let mut goal = Self::build(description, point_value, kind)?;
        goal.is_done = is_done;
        Ok(goal)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Current point value. For a completed checklist this includes the bonus.
    pub fn point_value(&self) -> u32 {
        self.point_value
    }

    pub fn is_done(&self) -> bool {
        self.is_done
    }

    pub fn kind(&self) -> &GoalKind {
        &self.kind
    }

    /// Apply one record event.
    ///
    /// Points are earned once per transition to done; recording a finished
    /// goal again earns nothing. Eternal goals never reach done and so
    /// never earn anything.
    pub fn record(&mut self) -> RecordOutcome {
        let points = i64::from(self.point_value);
        match &mut self.kind {
            GoalKind::Eternal => RecordOutcome::default(),
            _ if self.is_done => RecordOutcome::default(),
            GoalKind::Simple => {
                self.is_done = true;
                RecordOutcome {
                    points,
                    completed: true,
                }
            }
            GoalKind::Negative => {
                self.is_done = true;
                RecordOutcome {
                    points: -points,
                    completed: true,
                }
            }
            GoalKind::Checklist {
                target_count,
                current_progress,
                bonus_points,
            } => {
                *current_progress += 1;
                if *current_progress < *target_count {
                    return RecordOutcome::default();
                }
                self.is_done = true;
                self.point_value = self.point_value.saturating_add(*bonus_points);
                RecordOutcome {
                    points: i64::from(self.point_value),
                    completed: true,
                }
            }
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_done { 'X' } else { ' ' };
        match &self.kind {
            GoalKind::Simple => write!(f, "[{}] {}", mark, self.description),
            GoalKind::Eternal => write!(f, "[ ] {}", self.description),
            GoalKind::Checklist {
                target_count,
                current_progress,
                ..
            } => write!(
                f,
                "[{}] {} Completed {}/{} times",
                mark, self.description, current_progress, target_count
            ),
            GoalKind::Negative => write!(
                f,
                "[{}] {} (Negative Goal: Loses {} points)",
                mark, self.description, self.point_value
            ),
        }
    }
}

fn validate_description(description: &str) -> Result<(), GoalError> {
    if description.trim().is_empty() {
        return Err(GoalError::InvalidArgument(
            "description must not be empty".to_string(),
        ));
    }
    if description.contains(FIELD_DELIMITER) {
        return Err(GoalError::InvalidArgument(format!(
            "description must not contain '{FIELD_DELIMITER}'"
        )));
    }
    if description.contains(['\n', '\r']) {
        return Err(GoalError::InvalidArgument(
            "description must be a single line".to_string(),
        ));
    }
    Ok(())
}
