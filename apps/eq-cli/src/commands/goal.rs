// goal.rs — Goal subcommands: add, list, record, status.
//
// Every command loads the goal file (when it exists), acts on the tracker
// and writes the file back if anything changed. Level-ups are announced by
// the console banner sink while recording runs.

use clap::Subcommand;
use eq_goals::{Goal, GoalTracker, QuestConfig, RecordReport};

use crate::banner::Banner;

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a new goal.
    Add {
        #[command(subcommand)]
        kind: NewGoal,
    },
    /// List all goals.
    List {
        /// Print goals as a JSON array.
        #[arg(long)]
        json: bool,
    },
    /// Record progress on one goal (1-based position) or on every goal.
    Record {
        /// Goal position as shown by `list`.
        position: Option<usize>,
    },
    /// Show score and level.
    Status,
}

#[derive(Subcommand)]
pub enum NewGoal {
    /// Completed by a single record.
    Simple {
        description: String,
        #[arg(long)]
        points: u32,
    },
    /// Never completed; earns points every time it is recorded.
    Eternal {
        description: String,
        #[arg(long)]
        points: u32,
    },
    /// Completed after being recorded `target` times; pays a bonus.
    Checklist {
        description: String,
        #[arg(long)]
        points: u32,
        /// How many records complete the goal.
        #[arg(long)]
        target: u32,
        /// Extra points on completion.
        #[arg(long, default_value_t = 0)]
        bonus: u32,
    },
    /// A habit to avoid; recording it costs points.
    Negative {
        description: String,
        #[arg(long)]
        points: u32,
    },
}

pub fn execute(cmd: &GoalCommands, config: &QuestConfig) -> anyhow::Result<()> {
    let mut tracker = open_tracker(config)?;

    match cmd {
        GoalCommands::Add { kind } => add_goal(config, &mut tracker, kind),
        GoalCommands::List { json } => list_goals(&tracker, *json),
        GoalCommands::Record { position } => record(config, &mut tracker, *position),
        GoalCommands::Status => {
            show_status(&tracker);
            Ok(())
        }
    }
}

fn open_tracker(config: &QuestConfig) -> anyhow::Result<GoalTracker> {
    let mut tracker = GoalTracker::from_config(config)?;
    tracker.add_sink(Box::new(Banner));
    if config.goals_file.exists() {
        tracker.load_goals(&config.goals_file)?;
    }
    Ok(tracker)
}

fn add_goal(config: &QuestConfig, tracker: &mut GoalTracker, kind: &NewGoal) -> anyhow::Result<()> {
    let goal = match kind {
        NewGoal::Simple {
            description,
            points,
        } => Goal::simple(description.as_str(), *points)?,
        NewGoal::Eternal {
            description,
            points,
        } => Goal::eternal(description.as_str(), *points)?,
        NewGoal::Checklist {
            description,
            points,
            target,
            bonus,
        } => Goal::checklist(description.as_str(), *points, *target, *bonus)?,
        NewGoal::Negative {
            description,
            points,
        } => Goal::negative(description.as_str(), *points)?,
    };

    let line = goal.to_string();
    let position = tracker.add_goal(goal) + 1;
    tracker.save_goals(&config.goals_file)?;

    println!("Added goal {}: {}", position, line);
    Ok(())
}

fn list_goals(tracker: &GoalTracker, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tracker.goals())?);
        return Ok(());
    }

    if tracker.is_empty() {
        println!("No goals yet.");
        return Ok(());
    }

    println!("The goals are:");
    for line in tracker.display_goals() {
        println!("{}", line);
    }
    Ok(())
}

fn record(
    config: &QuestConfig,
    tracker: &mut GoalTracker,
    position: Option<usize>,
) -> anyhow::Result<()> {
    let report = match position {
        Some(0) => anyhow::bail!("goal positions start at 1"),
        Some(n) => tracker.record_goal(n - 1)?,
        None => tracker.record_goals(),
    };
    tracker.save_goals(&config.goals_file)?;

    print_report(&report);
    show_status(tracker);
    Ok(())
}

fn print_report(report: &RecordReport) {
    match report.points {
        0 => println!("No points this time."),
        p if p > 0 => println!("Congratulations! You have earned {} points!", p),
        p => println!("You lost {} points.", p.unsigned_abs()),
    }
}

fn show_status(tracker: &GoalTracker) {
    println!(
        "You have {} points. Level: {}",
        tracker.score(),
        tracker.level()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn add(config: &QuestConfig, kind: NewGoal) {
        execute(&GoalCommands::Add { kind }, config).unwrap();
    }

    #[test]
    fn add_then_record_persists_between_commands() {
        let project = TempDir::new().unwrap();
        let config = QuestConfig::for_project(project.path());

        add(
            &config,
            NewGoal::Simple {
                description: "Read".to_string(),
                points: 600,
            },
        );
        add(
            &config,
            NewGoal::Checklist {
                description: "Run 2x".to_string(),
                points: 200,
                target: 2,
                bonus: 300,
            },
        );

        execute(&GoalCommands::Record { position: None }, &config).unwrap();
        execute(&GoalCommands::Record { position: Some(2) }, &config).unwrap();

        let tracker = open_tracker(&config).unwrap();
        assert_eq!(tracker.score(), 1100);
        assert_eq!(tracker.level(), 2);
        assert!(tracker.goals().iter().all(|g| g.is_done()));
    }

    #[test]
    fn record_rejects_bad_positions() {
        let project = TempDir::new().unwrap();
        let config = QuestConfig::for_project(project.path());
        add(
            &config,
            NewGoal::Eternal {
                description: "Pray".to_string(),
                points: 10,
            },
        );

        assert!(execute(&GoalCommands::Record { position: Some(0) }, &config).is_err());
        assert!(execute(&GoalCommands::Record { position: Some(2) }, &config).is_err());
    }

    #[test]
    fn invalid_goal_is_not_saved() {
        let project = TempDir::new().unwrap();
        let config = QuestConfig::for_project(project.path());

        let result = execute(
            &GoalCommands::Add {
                kind: NewGoal::Negative {
                    description: "a|b".to_string(),
                    points: 10,
                },
            },
            &config,
        );
        assert!(result.is_err());
        assert!(!config.goals_file.exists());
    }

    #[test]
    fn events_are_logged_next_to_goals() {
        let project = TempDir::new().unwrap();
        let config = QuestConfig::for_project(project.path());
        add(
            &config,
            NewGoal::Simple {
                description: "Read".to_string(),
                points: 1000,
            },
        );
        execute(&GoalCommands::Record { position: Some(1) }, &config).unwrap();

        let log = std::fs::read_to_string(&config.events_log).unwrap();
        assert!(log.contains("level_up"));
        assert!(log.contains("goals_saved"));
    }
}
