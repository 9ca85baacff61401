//! Immutable bilingual dictionary index.
//!
//! Built once at startup from an ordered word list. Positions are dense
//! `0..len` and are what the task generator samples from. The two lookup
//! maps are last-write-wins: if a target word appears twice, `source_of`
//! resolves to the later entry's source word.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// A word pair: `source` is the expected answer, `target` is shown as the question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub source: String,
    pub target: String,
}

impl DictionaryEntry {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Bidirectional word lookup plus positional access.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
    source_to_target: HashMap<String, String>,
    target_to_source: HashMap<String, String>,
}

impl Dictionary {
    /// Index an ordered word list. Fails only when the list is empty.
    pub fn build<I>(entries: I) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = DictionaryEntry>,
    {
        let entries: Vec<DictionaryEntry> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(QuizError::EmptyDictionary);
        }

        let mut source_to_target = HashMap::with_capacity(entries.len());
        let mut target_to_source = HashMap::with_capacity(entries.len());
        for entry in &entries {
            source_to_target.insert(entry.source.clone(), entry.target.clone());
            target_to_source.insert(entry.target.clone(), entry.source.clone());
        }

        Ok(Self {
            entries,
            source_to_target,
            target_to_source,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn entry(&self, position: usize) -> Option<&DictionaryEntry> {
        self.entries.get(position)
    }

    /// The question word shown for an expected answer.
    pub fn target_of(&self, source: &str) -> Option<&str> {
        self.source_to_target.get(source).map(String::as_str)
    }

    /// The expected answer for a question word.
    pub fn source_of(&self, target: &str) -> Option<&str> {
        self.target_to_source.get(target).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        Dictionary::build(vec![
            DictionaryEntry::new("soba", "room"),
            DictionaryEntry::new("Sneško Belić", "snowman"),
        ])
        .unwrap()
    }

    #[test]
    fn lookups_in_both_directions() {
        let dict = sample();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.target_of("soba"), Some("room"));
        assert_eq!(dict.source_of("snowman"), Some("Sneško Belić"));
        assert_eq!(dict.source_of("house"), None);
    }

    #[test]
    fn positions_follow_input_order() {
        let dict = sample();
        assert_eq!(dict.entry(0).unwrap().target, "room");
        assert_eq!(dict.entry(1).unwrap().source, "Sneško Belić");
        assert!(dict.entry(2).is_none());
    }

    #[test]
    fn duplicate_target_last_write_wins() {
        let dict = Dictionary::build(vec![
            DictionaryEntry::new("sređivati", "tidy up"),
            DictionaryEntry::new("spremati", "tidy up"),
        ])
        .unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.source_of("tidy up"), Some("spremati"));
        assert_eq!(dict.target_of("sređivati"), Some("tidy up"));
    }

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(
            Dictionary::build(Vec::new()).unwrap_err(),
            QuizError::EmptyDictionary
        );
    }
}
