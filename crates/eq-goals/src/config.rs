// config.rs — Where the tracker keeps its files and how fast levels come.
//
// `QuestConfig::for_project()` lays everything out under `.quest/` in the
// project root. `QuestConfig::load()` applies overrides from
// `.quest/config.toml` when that file exists. Relative paths in the file
// are resolved against the project root.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Points needed per level band unless configured otherwise.
pub const DEFAULT_LEVEL_STEP: u32 = 1000;

/// Resolved tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestConfig {
    /// Flat goal file read by load and written by save.
    pub goals_file: PathBuf,

    /// JSONL event log.
    pub events_log: PathBuf,

    /// Level N is left once the score reaches `N * level_step`.
    pub level_step: u32,
}

/// Optional overrides as written in `config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    goals_file: Option<PathBuf>,
    events_log: Option<PathBuf>,
    level_step: Option<u32>,
}

impl QuestConfig {
    /// Create a config with the standard `.quest/` layout for a project.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let quest_dir = project_root.as_ref().join(".quest");
        Self {
            goals_file: quest_dir.join("goals.txt"),
            events_log: quest_dir.join("events.jsonl"),
            level_step: DEFAULT_LEVEL_STEP,
        }
    }

    /// Path of the optional config file for a project.
    pub fn config_path(project_root: impl AsRef<Path>) -> PathBuf {
        project_root.as_ref().join(".quest").join("config.toml")
    }

    /// Defaults for the project, overridden by `.quest/config.toml` if present.
    pub fn load(project_root: impl AsRef<Path>) -> Result<Self, GoalError> {
        let root = project_root.as_ref();
        let mut config = Self::for_project(root);
        let path = Self::config_path(root);
        if !path.exists() {
            return Ok(config);
        }

        let text = fs::read_to_string(&path).map_err(|source| GoalError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&text).map_err(|e| GoalError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if let Some(goals_file) = file.goals_file {
            config.goals_file = root.join(goals_file);
        }
        if let Some(events_log) = file.events_log {
            config.events_log = root.join(events_log);
        }
        if let Some(level_step) = file.level_step {
            if level_step == 0 {
                return Err(GoalError::Config {
                    path: path.display().to_string(),
                    reason: "level_step must be positive".to_string(),
                });
            }
            config.level_step = level_step;
        }

        tracing::debug!(config = ?config, "loaded quest config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(root: &Path, body: &str) {
        let path = QuestConfig::config_path(root);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn defaults_live_under_quest_dir() {
        let config = QuestConfig::for_project("/tmp/project");
        assert_eq!(
            config.goals_file,
            PathBuf::from("/tmp/project/.quest/goals.txt")
        );
        assert_eq!(
            config.events_log,
            PathBuf::from("/tmp/project/.quest/events.jsonl")
        );
        assert_eq!(config.level_step, DEFAULT_LEVEL_STEP);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = QuestConfig::load(dir.path()).unwrap();
        assert_eq!(config, QuestConfig::for_project(dir.path()));
    }

    #[test]
    fn file_overrides_are_applied() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "goals_file = \"my-goals.txt\"\nlevel_step = 500\n");

        let config = QuestConfig::load(dir.path()).unwrap();
        assert_eq!(config.goals_file, dir.path().join("my-goals.txt"));
        assert_eq!(config.level_step, 500);
        assert_eq!(
            config.events_log,
            QuestConfig::for_project(dir.path()).events_log
        );
    }

    #[test]
    fn zero_level_step_is_rejected() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "level_step = 0\n");
        assert!(matches!(
            QuestConfig::load(dir.path()),
            Err(GoalError::Config { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "colour = \"blue\"\n");
        assert!(matches!(
            QuestConfig::load(dir.path()),
            Err(GoalError::Config { .. })
        ));
    }
}
