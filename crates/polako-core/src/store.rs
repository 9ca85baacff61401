//! The user record store.
//!
//! Owns every profile and outstanding task behind a single mutex. Each public
//! operation holds the lock for its whole duration and never across I/O;
//! persistence goes through [`UserStore::snapshot`], which hands back a value
//! copy.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::QuizError;
use crate::model::{
    OutstandingTask, PersistedState, UserId, UserProfile, DEFAULT_TASK_SIZE,
};

/// The two mappings guarded by the store lock.
#[derive(Debug, Default)]
pub(crate) struct StoreState {
    pub(crate) users: BTreeMap<UserId, UserProfile>,
    pub(crate) tasks: BTreeMap<UserId, OutstandingTask>,
}

/// Thread-safe store of user profiles and outstanding tasks.
#[derive(Debug)]
pub struct UserStore {
    state: Mutex<StoreState>,
    default_task_size: usize,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self::with_default_task_size(DEFAULT_TASK_SIZE)
    }

    /// Create an empty store whose new users start with `task_size` words.
    /// A zero size is replaced by [`DEFAULT_TASK_SIZE`].
    pub fn with_default_task_size(task_size: usize) -> Self {
        let default_task_size = if task_size == 0 {
            DEFAULT_TASK_SIZE
        } else {
            task_size
        };
        Self {
            state: Mutex::new(StoreState::default()),
            default_task_size,
        }
    }

    pub fn default_task_size(&self) -> usize {
        self.default_task_size
    }

    /// Create a profile on first contact. Returns `true` if one was created.
    pub fn ensure_user(&self, id: UserId, display_name: &str) -> bool {
        let mut state = self.lock();
        if state.users.contains_key(&id) {
            return false;
        }
        state
            .users
            .insert(id, UserProfile::new(display_name, self.default_task_size));
        tracing::debug!(user = id, name = display_name, "created user profile");
        true
    }

    /// Overwrite a user's task size and return the size actually stored.
    ///
    /// Zero is not a valid size and is replaced by the store default.
    pub fn set_task_size(&self, id: UserId, size: usize) -> Result<usize, QuizError> {
        let size = if size == 0 {
            self.default_task_size
        } else {
            size
        };
        let mut state = self.lock();
        let profile = state
            .users
            .get_mut(&id)
            .ok_or(QuizError::UnknownUser(id))?;
        profile.task_size = size;
        tracing::debug!(user = id, size, "task size changed");
        Ok(size)
    }

    pub fn has_outstanding_task(&self, id: UserId) -> bool {
        self.lock().tasks.contains_key(&id)
    }

    /// `false` for unknown users.
    pub fn is_learning_mode(&self, id: UserId) -> bool {
        self.lock()
            .users
            .get(&id)
            .is_some_and(UserProfile::is_learning)
    }

    pub fn profile(&self, id: UserId) -> Option<UserProfile> {
        self.lock().users.get(&id).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    /// Value copy of all profiles and tasks. The lock is released on return.
    pub fn snapshot(&self) -> PersistedState {
        let state = self.lock();
        PersistedState {
            saved_at: None,
            users: state.users.clone(),
            tasks: state.tasks.clone(),
        }
    }

    /// Replace the entire store content. Intended for startup only.
    ///
    /// Profiles saved with a zero task size get the store default.
    pub fn restore(&self, mut data: PersistedState) {
        for (id, profile) in data.users.iter_mut() {
            if profile.task_size == 0 {
                tracing::warn!(user = *id, "restored task size 0, using default");
                profile.task_size = self.default_task_size;
            }
        }
        let mut state = self.lock();
        state.users = data.users;
        state.tasks = data.tasks;
        tracing::debug!(
            users = state.users.len(),
            tasks = state.tasks.len(),
            "store restored"
        );
    }

    /// Run `f` with exclusive access to both mappings, so that a whole
    /// generate or evaluate transition is atomic.
    pub(crate) fn transact<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let mut state = self.lock();
        f(&mut state)
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // Every mutation leaves both maps consistent, so a panic elsewhere
        // cannot leave a half-applied transition behind.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
