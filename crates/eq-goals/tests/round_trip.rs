// round_trip.rs — A full tracker session through the public API.
//
// Builds one goal of every kind, records progress across several cycles,
// saves, reloads into a fresh tracker and checks that nothing drifted.
// Then corrupts the file and checks the load refuses it.

use std::fs;

use tempfile::tempdir;

use eq_goals::{Goal, GoalError, GoalKind, GoalTracker};

fn session() -> GoalTracker {
    let mut tracker = GoalTracker::new();
    tracker.add_goal(Goal::simple("Read scriptures", 500).unwrap());
    tracker.add_goal(Goal::eternal("Pray", 100).unwrap());
    tracker.add_goal(Goal::checklist("Run 3x", 200, 3, 400).unwrap());
    tracker.add_goal(Goal::negative("Skip gym", 50).unwrap());
    tracker
}

#[test]
fn every_kind_survives_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("goals.txt");

    let mut tracker = session();
    for _ in 0..3 {
        tracker.record_goals();
    }
    // 500 + (200 + 400) - 50; the eternal goal never scores
    assert_eq!(tracker.score(), 1050);
    assert_eq!(tracker.level(), 2);

    tracker.save_goals(&path).unwrap();

    let mut restored = GoalTracker::new();
    restored.load_goals(&path).unwrap();

    assert_eq!(restored.score(), tracker.score());
    assert_eq!(restored.level(), tracker.level());
    assert_eq!(restored.goals(), tracker.goals());
    assert_eq!(restored.display_goals(), tracker.display_goals());

    match restored.goals()[2].kind() {
        GoalKind::Checklist {
            target_count,
            current_progress,
            bonus_points,
        } => {
            assert_eq!(*target_count, 3);
            assert_eq!(*current_progress, 3);
            assert_eq!(*bonus_points, 400);
        }
        other => panic!("expected checklist, got {other:?}"),
    }
    assert_eq!(restored.goals()[2].point_value(), 600);
}

#[test]
fn reloaded_goals_keep_scoring_rules() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("goals.txt");

    let mut tracker = session();
    tracker.record_goals();
    tracker.save_goals(&path).unwrap();

    let mut restored = GoalTracker::new();
    restored.load_goals(&path).unwrap();
    let score_before = restored.score();

    // Simple and negative are done already, the eternal goal never pays and
    // the checklist only advances from 1 to 2.
    let report = restored.record_goals();
    assert_eq!(report.points, 0);
    assert!(report.completed.is_empty());
    assert_eq!(restored.score(), score_before);
    assert_eq!(
        restored.display_goals()[2],
        "3. [ ] Run 3x Completed 2/3 times"
    );
}

#[test]
fn file_layout_is_one_record_per_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("goals.txt");

    session().save_goals(&path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "0",
            "1",
            "SimpleGoal|Read scriptures|500|false",
            "EternalGoal|Pray|100|false",
            "ChecklistGoal|Run 3x|200|false|3|0|400",
            "NegativeGoal|Skip gym|50|false",
        ]
    );
}

#[test]
fn malformed_line_aborts_the_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("goals.txt");

    session().save_goals(&path).unwrap();
    let mut text = fs::read_to_string(&path).unwrap();
    text.push_str("ChecklistGoal|Half a record|10\n");
    text.push_str("SimpleGoal|After the bad line|5|false\n");
    fs::write(&path, text).unwrap();

    let mut tracker = GoalTracker::new();
    let err = tracker.load_goals(&path).unwrap_err();
    assert!(matches!(err, GoalError::Parse { line: 7, .. }));
    assert!(tracker.is_empty());
}
