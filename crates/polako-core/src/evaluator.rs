//! Answer checking and report rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;

/// Characters ignored when comparing answers.
pub const IGNORED_PUNCTUATION: &[char] = &[
    '-', ',', '.', ';', ':', '!', '?', '(', ')', '{', '}', '[', ']',
];

/// Shown in place of the question when an expected answer is no longer in the
/// dictionary (e.g. a task restored against a different word list).
const UNKNOWN_QUESTION: &str = "?";

/// Trim surrounding whitespace, then drop ignored punctuation.
///
/// Whitespace left next to removed punctuation stays: `"soba ,"` becomes
/// `"soba "`. Case and diacritics are kept: `Srbija` and `srbija` stay
/// different.
pub fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !IGNORED_PUNCTUATION.contains(c))
        .collect()
}

/// A wrongly answered (or unanswered) item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mistake {
    /// The question word that was shown.
    pub question: String,
    /// The normalized expected answer.
    pub expected: String,
}

/// Outcome of checking one submission against an outstanding task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Per-item correctness in task order.
    pub results: Vec<bool>,
    pub mistakes: Vec<Mistake>,
}

impl Evaluation {
    pub fn correct(&self) -> usize {
        self.results.iter().filter(|&&ok| ok).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn is_perfect(&self) -> bool {
        self.mistakes.is_empty()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Correct {}/{}", self.correct(), self.total())?;
        for m in &self.mistakes {
            write!(f, "\n{} - {}", m.question, m.expected)?;
        }
        Ok(())
    }
}

/// Compare `submitted` against `expected` item by item.
///
/// Missing submissions count as wrong. Extra submissions are ignored.
pub fn grade(dictionary: &Dictionary, expected: &[String], submitted: &[&str]) -> Evaluation {
    let mut results = Vec::with_capacity(expected.len());
    let mut mistakes = Vec::new();

    for (i, answer) in expected.iter().enumerate() {
        let etalon = normalize(answer);
        let ok = submitted
            .get(i)
            .is_some_and(|given| normalize(given) == etalon);
        if !ok {
            let question = dictionary.target_of(answer).unwrap_or(UNKNOWN_QUESTION);
            mistakes.push(Mistake {
                question: question.to_string(),
                expected: etalon,
            });
        }
        results.push(ok);
    }

    Evaluation { results, mistakes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::DictionaryEntry;

    fn dict() -> Dictionary {
        Dictionary::build(vec![
            DictionaryEntry::new("sobа", "room"),
            DictionaryEntry::new("Sneško Belić", "snowman"),
            DictionaryEntry::new("Srbija (Srbin, Srpkinja)", "Serbia"),
        ])
        .unwrap()
    }

    fn expected(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn normalize_strips_punctuation_and_whitespace() {
        assert_eq!(normalize("sobа,"), normalize("sobа "));
        assert_eq!(normalize("  sređivati; sređujem. "), "sređivati sređujem");
        assert_eq!(normalize("(Srbin)"), "Srbin");
    }

    #[test]
    fn normalize_trims_before_stripping() {
        assert_eq!(normalize("soba ,"), "soba ");
        assert_eq!(normalize("- soba"), " soba");
        assert_eq!(normalize("  soba,  "), "soba");
    }

    #[test]
    fn normalize_keeps_case_and_diacritics() {
        assert_ne!(normalize("Srbija"), normalize("srbija"));
        assert_ne!(normalize("Belić"), normalize("Belic"));
    }

    #[test]
    fn all_correct_report_has_no_mistake_lines() {
        let eval = grade(&dict(), &expected(&["sobа"]), &["sobа"]);
        assert_eq!(eval.results, vec![true]);
        assert!(eval.is_perfect());
        assert_eq!(eval.to_string(), "Correct 1/1");
    }

    #[test]
    fn wrong_and_missing_answers_are_listed() {
        let eval = grade(
            &dict(),
            &expected(&["sobа", "Sneško Belić", "Srbija (Srbin, Srpkinja)"]),
            &["soba", "Sneško Belić"],
        );
        assert_eq!(eval.results, vec![false, true, false]);
        assert_eq!(eval.correct(), 1);
        assert_eq!(
            eval.to_string(),
            "Correct 1/3\nroom - sobа\nSerbia - Srbija Srbin Srpkinja"
        );
    }

    #[test]
    fn punctuation_in_answers_is_ignored() {
        let eval = grade(
            &dict(),
            &expected(&["Srbija (Srbin, Srpkinja)"]),
            &["Srbija Srbin Srpkinja!"],
        );
        assert!(eval.is_perfect());
    }

    #[test]
    fn space_before_punctuation_is_wrong() {
        let eval = grade(&dict(), &expected(&["sobа"]), &["sobа ,"]);
        assert_eq!(eval.results, vec![false]);
        assert_eq!(eval.to_string(), "Correct 0/1\nroom - sobа");
    }

    #[test]
    fn extra_answers_are_ignored() {
        let eval = grade(&dict(), &expected(&["sobа"]), &["sobа", "extra", "lines"]);
        assert_eq!(eval.total(), 1);
        assert!(eval.is_perfect());
    }

    #[test]
    fn unknown_expected_word_uses_placeholder() {
        let eval = grade(&dict(), &expected(&["kuća"]), &[]);
        assert_eq!(eval.to_string(), "Correct 0/1\n? - kuća");
    }
}
