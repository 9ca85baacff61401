//! Core data model types for polako.
//!
//! User profiles, outstanding tasks and the persisted form of the store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable numeric user identifier supplied by the transport.
pub type UserId = i64;

/// Task size given to new users and used when a requested size is invalid.
pub const DEFAULT_TASK_SIZE: usize = 10;

/// Task size that puts a user into learning mode.
pub const LEARNING_TASK_SIZE: usize = 1;

/// Per-user settings and answer history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name as reported by the transport.
    pub name: String,
    /// Number of words per task.
    pub task_size: usize,
    /// Per-item correctness, oldest first. Only ever appended to.
    #[serde(default)]
    pub history: Vec<bool>,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, task_size: usize) -> Self {
        Self {
            name: name.into(),
            task_size,
            history: Vec::with_capacity(100),
        }
    }

    /// Learning mode chains single-word tasks after every answer.
    pub fn is_learning(&self) -> bool {
        self.task_size == LEARNING_TASK_SIZE
    }
}

/// The expected answers of the task a user currently has to solve, in the
/// order the questions were presented.
pub type OutstandingTask = Vec<String>;

/// A value copy of the whole store, as written to and read from the sink.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    /// When this snapshot was written. Absent in snapshots that were never saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    /// Profiles keyed by user id.
    #[serde(default)]
    pub users: BTreeMap<UserId, UserProfile>,
    /// Outstanding tasks keyed by user id.
    #[serde(default)]
    pub tasks: BTreeMap<UserId, OutstandingTask>,
}
