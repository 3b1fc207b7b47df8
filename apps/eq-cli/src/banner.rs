// banner.rs — Console notifications for tracker events.
//
// Registered as a sink on the tracker so level-ups and completions are
// announced the moment they happen, in recording order.

use eq_goals::{GoalError, NotificationSink, QuestEvent};

/// Prints a line to stdout for level-ups and completed goals.
pub struct Banner;

impl Banner {
    /// The line shown for an event, if it is one worth announcing.
    pub fn render(event: &QuestEvent) -> Option<String> {
        match event {
            QuestEvent::LevelUp { level, .. } => Some(format!(
                "Congratulations! You leveled up to Level {}!",
                level
            )),
            QuestEvent::GoalCompleted {
                description,
                point_value,
                ..
            } => Some(format!("Goal complete: {} ({} points)", description, point_value)),
            _ => None,
        }
    }
}

impl NotificationSink for Banner {
    fn send(&self, event: &QuestEvent) -> Result<(), GoalError> {
        if let Some(line) = Self::render(event) {
            println!("{}", line);
        }
        Ok(())
    }
}
