// codec.rs — Line-oriented text format for goal files.
//
// Layout:
//   line 1   score
//   line 2   level
//   line 3.. kind|description|point_value|is_done[|target|progress|bonus]
//
// The trailing three fields are present for checklist goals only. There is
// no escaping and no version header; descriptions are kept free of the
// delimiter by the Goal constructors.

use std::fmt;
use std::str::FromStr;

use crate::error::GoalError;
use crate::goal::{Goal, GoalKind, FIELD_DELIMITER};

const BASE_FIELDS: usize = 4;
const CHECKLIST_FIELDS: usize = 7;

/// On-disk discriminator for a goal variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalKindTag {
    Simple,
    Eternal,
    Checklist,
    Negative,
}

impl GoalKindTag {
    pub fn of(kind: &GoalKind) -> Self {
        match kind {
            GoalKind::Simple => GoalKindTag::Simple,
            GoalKind::Eternal => GoalKindTag::Eternal,
            GoalKind::Checklist { .. } => GoalKindTag::Checklist,
            GoalKind::Negative => GoalKindTag::Negative,
        }
    }

    fn field_count(self) -> usize {
        match self {
            GoalKindTag::Checklist => CHECKLIST_FIELDS,
            _ => BASE_FIELDS,
        }
    }
}

impl fmt::Display for GoalKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalKindTag::Simple => write!(f, "SimpleGoal"),
            GoalKindTag::Eternal => write!(f, "EternalGoal"),
            GoalKindTag::Checklist => write!(f, "ChecklistGoal"),
            GoalKindTag::Negative => write!(f, "NegativeGoal"),
        }
    }
}

impl FromStr for GoalKindTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SimpleGoal" => Ok(GoalKindTag::Simple),
            "EternalGoal" => Ok(GoalKindTag::Eternal),
            "ChecklistGoal" => Ok(GoalKindTag::Checklist),
            "NegativeGoal" => Ok(GoalKindTag::Negative),
            other => Err(format!("unknown goal kind '{other}'")),
        }
    }
}

/// Score, level and goals as read from or written to a goal file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub score: i64,
    pub level: u32,
    pub goals: Vec<Goal>,
}

/// Serialize one goal as a single record (no trailing newline).
pub fn encode_goal(goal: &Goal) -> String {
    let tag = GoalKindTag::of(goal.kind());
    let mut fields = vec![
        tag.to_string(),
        goal.description().to_string(),
        goal.point_value().to_string(),
        goal.is_done().to_string(),
    ];
    if let GoalKind::Checklist {
        target_count,
        current_progress,
        bonus_points,
    } = goal.kind()
    {
        fields.push(target_count.to_string());
        fields.push(current_progress.to_string());
        fields.push(bonus_points.to_string());
    }
    let delimiter = FIELD_DELIMITER.to_string();
    fields.join(delimiter.as_str())
}

/// Decode one goal record. `line` is the 1-based file line, used in errors.
pub fn decode_goal(line: usize, record: &str) -> Result<Goal, GoalError> {
    let fields: Vec<&str> = record.split(FIELD_DELIMITER).collect();
    let tag: GoalKindTag = fields[0]
        .parse()
        .map_err(|reason: String| GoalError::parse(line, reason))?;

    if fields.len() != tag.field_count() {
        return Err(GoalError::parse(
            line,
            format!(
                "{tag} needs {} fields, found {}",
                tag.field_count(),
                fields.len()
            ),
        ));
    }

    let description = fields[1].to_string();
    let point_value = parse_number(line, "point value", fields[2])?;
    let is_done = parse_bool(line, fields[3])?;
    let kind = match tag {
        GoalKindTag::Simple => GoalKind::Simple,
        GoalKindTag::Eternal => GoalKind::Eternal,
        GoalKindTag::Negative => GoalKind::Negative,
        GoalKindTag::Checklist => GoalKind::Checklist {
            target_count: parse_number(line, "target count", fields[4])?,
            current_progress: parse_number(line, "current progress", fields[5])?,
            bonus_points: parse_number(line, "bonus points", fields[6])?,
        },
    };

    Goal::restore(description, point_value, is_done, kind).map_err(|e| match e {
        GoalError::InvalidArgument(reason) => GoalError::parse(line, reason),
        other => other,
    })
}

/// Render a full goal file.
pub fn encode_snapshot(score: i64, level: u32, goals: &[Goal]) -> String {
    let mut out = format!("{score}\n{level}\n");
    for goal in goals {
        out.push_str(&encode_goal(goal));
        out.push('\n');
    }
    out
}

/// Parse a full goal file. Blank lines at the end are ignored; every other
/// goal line must decode, so a blank line between records is an error.
pub fn decode_snapshot(text: &str) -> Result<Snapshot, GoalError> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (line, raw) = lines
        .next()
        .ok_or_else(|| GoalError::parse(1, "missing score line"))?;
    let score: i64 = raw
        .trim()
        .parse()
        .map_err(|_| GoalError::parse(line, format!("score '{raw}' is not an integer")))?;

    let (line, raw) = lines
        .next()
        .ok_or_else(|| GoalError::parse(2, "missing level line"))?;
    let level: u32 = parse_number(line, "level", raw.trim())?;
    if level == 0 {
        return Err(GoalError::parse(line, "level must be at least 1"));
    }

    let mut records: Vec<(usize, &str)> = lines.collect();
    while records.last().is_some_and(|(_, raw)| raw.trim().is_empty()) {
        records.pop();
    }

    let mut goals = Vec::with_capacity(records.len());
    for (line, raw) in records {
        if raw.trim().is_empty() {
            return Err(GoalError::parse(line, "blank line between goal records"));
        }
        goals.push(decode_goal(line, raw)?);
    }

    Ok(Snapshot {
        score,
        level,
        goals,
    })
}

fn parse_number(line: usize, field: &str, raw: &str) -> Result<u32, GoalError> {
    raw.parse()
        .map_err(|_| GoalError::parse(line, format!("{field} '{raw}' is not a non-negative integer")))
}

// Accepts any casing so files holding "True"/"False" still load.
fn parse_bool(line: usize, raw: &str) -> Result<bool, GoalError> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(GoalError::parse(
            line,
            format!("done flag '{raw}' is not true or false"),
        ))
    }
}
