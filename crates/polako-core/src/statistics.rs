//! Success-rate scoring over answer history.

use serde::{Deserialize, Serialize};

use crate::model::{PersistedState, UserId};

/// Percentage of `true` entries, truncated. `None` for an empty history.
pub fn success_rate(history: &[bool]) -> Option<u32> {
    if history.is_empty() {
        return None;
    }
    let correct = history.iter().filter(|&&ok| ok).count();
    Some((correct * 100 / history.len()) as u32)
}

/// Per-user summary row for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub task_size: usize,
    pub answered: usize,
    pub correct: usize,
    pub rate: Option<u32>,
    pub has_task: bool,
}

/// Summaries for every user in a snapshot, ordered by user id.
pub fn summarize(state: &PersistedState) -> Vec<UserSummary> {
    state
        .users
        .iter()
        .map(|(&id, profile)| UserSummary {
            id,
            name: profile.name.clone(),
            task_size: profile.task_size,
            answered: profile.history.len(),
            correct: profile.history.iter().filter(|&&ok| ok).count(),
            rate: success_rate(&profile.history),
            has_task: state.tasks.contains_key(&id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserProfile;

    #[test]
    fn rate_truncates() {
        assert_eq!(success_rate(&[true, false, true, true]), Some(75));
        assert_eq!(success_rate(&[true, false, false]), Some(33));
        assert_eq!(success_rate(&[true, true]), Some(100));
        assert_eq!(success_rate(&[false]), Some(0));
    }

    #[test]
    fn rate_of_empty_history() {
        assert_eq!(success_rate(&[]), None);
    }

    #[test]
    fn summaries_in_id_order() {
        let mut state = PersistedState::default();
        let mut marko = UserProfile::new("Marko", 1);
        marko.history = vec![true, false];
        state.users.insert(20, marko);
        state.users.insert(3, UserProfile::new("Ana", 10));
        state.tasks.insert(3, vec!["soba".into()]);

        let rows = summarize(&state);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 3);
        assert!(rows[0].has_task);
        assert_eq!(rows[0].rate, None);
        assert_eq!(rows[1].correct, 1);
        assert_eq!(rows[1].rate, Some(50));
    }
}
