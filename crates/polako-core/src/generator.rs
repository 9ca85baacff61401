//! Random task drawing.
//!
//! A task is `n` distinct dictionary positions. Small tasks are drawn by
//! rejection sampling; once `n` exceeds half the dictionary that degrades, so
//! larger tasks use `rand::seq::index::sample` (a partial shuffle) instead.

use std::collections::HashSet;

use rand::Rng;

use crate::dictionary::Dictionary;
use crate::error::QuizError;

/// Questions to present and the answers expected for them, index-aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTask {
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

impl GeneratedTask {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Draw `size` distinct entries from `dictionary`.
pub fn draw_task<R: Rng + ?Sized>(
    dictionary: &Dictionary,
    size: usize,
    rng: &mut R,
) -> Result<GeneratedTask, QuizError> {
    if size == 0 || size > dictionary.len() {
        return Err(QuizError::InvalidTaskSize {
            size,
            dictionary_size: dictionary.len(),
        });
    }

    let mut questions = Vec::with_capacity(size);
    let mut answers = Vec::with_capacity(size);
    for position in sample_positions(rng, dictionary.len(), size) {
        if let Some(entry) = dictionary.entry(position) {
            questions.push(entry.target.clone());
            answers.push(entry.source.clone());
        }
    }

    Ok(GeneratedTask { questions, answers })
}

/// `amount` distinct positions in `0..length`. Requires `amount <= length`.
pub(crate) fn sample_positions<R: Rng + ?Sized>(
    rng: &mut R,
    length: usize,
    amount: usize,
) -> Vec<usize> {
    if amount.saturating_mul(2) > length {
        return rand::seq::index::sample(rng, length, amount).into_vec();
    }

    let mut seen = HashSet::with_capacity(amount);
    let mut picked = Vec::with_capacity(amount);
    while picked.len() < amount {
        let position = rng.gen_range(0..length);
        if seen.insert(position) {
            picked.push(position);
        }
    }
    picked
}
