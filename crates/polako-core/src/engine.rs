//! Quiz engine: the task lifecycle over the shared store.
//!
//! Per user the lifecycle is `NoTask -> generate -> TaskOutstanding ->
//! evaluate -> NoTask`. Both transitions run entirely under the store lock.

use std::sync::Arc;

use rand::Rng;

use crate::dictionary::Dictionary;
use crate::error::QuizError;
use crate::evaluator::{grade, Evaluation};
use crate::generator::draw_task;
use crate::model::UserId;
use crate::statistics::success_rate;
use crate::store::UserStore;

/// Generates and evaluates tasks against a read-only dictionary.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    dictionary: Arc<Dictionary>,
    store: Arc<UserStore>,
}

impl QuizEngine {
    pub fn new(dictionary: Arc<Dictionary>, store: Arc<UserStore>) -> Self {
        Self { dictionary, store }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn store(&self) -> &Arc<UserStore> {
        &self.store
    }

    /// Issue a new task sized by the user's preference and return its questions.
    ///
    /// Any task the user already had is replaced; callers check
    /// [`UserStore::has_outstanding_task`] first.
    pub fn generate(&self, id: UserId) -> Result<Vec<String>, QuizError> {
        self.generate_with(id, &mut rand::thread_rng())
    }

    /// [`generate`](Self::generate) with an explicit random source.
    pub fn generate_with<R: Rng + ?Sized>(
        &self,
        id: UserId,
        rng: &mut R,
    ) -> Result<Vec<String>, QuizError> {
        self.store.transact(|state| {
            let size = state
                .users
                .get(&id)
                .ok_or(QuizError::UnknownUser(id))?
                .task_size;
            let task = draw_task(&self.dictionary, size, rng)?;
            if state.tasks.insert(id, task.answers).is_some() {
                tracing::warn!(user = id, "replaced an unanswered task");
            }
            tracing::debug!(user = id, size, "task issued");
            Ok(task.questions)
        })
    }

    /// Check `submitted` against the user's outstanding task, append the
    /// per-item results to their history and consume the task.
    pub fn evaluate<S: AsRef<str>>(
        &self,
        id: UserId,
        submitted: &[S],
    ) -> Result<Evaluation, QuizError> {
        let submitted: Vec<&str> = submitted.iter().map(AsRef::as_ref).collect();
        self.store.transact(|state| {
            let profile = state
                .users
                .get_mut(&id)
                .ok_or(QuizError::UnknownUser(id))?;
            let expected = state
                .tasks
                .remove(&id)
                .ok_or(QuizError::NoOutstandingTask(id))?;

            let evaluation = grade(&self.dictionary, &expected, &submitted);
            profile.history.extend_from_slice(&evaluation.results);
            tracing::debug!(
                user = id,
                correct = evaluation.correct(),
                total = evaluation.total(),
                "task evaluated"
            );
            Ok(evaluation)
        })
    }

    /// Integer success percentage over the user's whole history.
    pub fn rate(&self, id: UserId) -> Result<u32, QuizError> {
        let profile = self.store.profile(id).ok_or(QuizError::UnknownUser(id))?;
        success_rate(&profile.history).ok_or(QuizError::EmptyHistory(id))
    }
}
