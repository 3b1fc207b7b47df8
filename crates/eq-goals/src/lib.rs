//! # eq-goals
//!
//! Goal tracking with points, levels and flat-file persistence for
//! Eternal Quest.
//!
//! ## Key components
//!
//! - [`Goal`] — one objective; its [`GoalKind`] (simple, eternal, checklist,
//!   negative) decides what recording does
//! - [`GoalTracker`] — ordered goals plus score and level; records, saves
//!   and loads
//! - [`codec`] — the `|`-delimited line format of the goal file
//! - [`QuestEvent`] / [`EventDispatcher`] — notifications such as level-ups
//! - [`QuestConfig`] — file locations and level step for a project

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod tracker;

pub use codec::{GoalKindTag, Snapshot};
pub use config::QuestConfig;
pub use error::GoalError;
pub use events::{EventDispatcher, LogSink, NotificationSink, QuestEvent};
pub use goal::{Goal, GoalKind, RecordOutcome};
pub use tracker::{GoalTracker, RecordReport};
