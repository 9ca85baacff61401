//! Word list readers.
//!
//! Loads dictionary entries from tab-separated or TOML files and validates
//! them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::dictionary::{Dictionary, DictionaryEntry};
use crate::evaluator::normalize;

/// Supported word list file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordListFormat {
    /// `source<TAB>target` per line.
    Tsv,
    /// `[[words]]` tables with `source` and `target` keys.
    Toml,
}

impl WordListFormat {
    /// Pick a format from the file extension. Unknown extensions read as TSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => WordListFormat::Toml,
            _ => WordListFormat::Tsv,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlWordList {
    #[serde(default)]
    words: Vec<TomlWord>,
}

#[derive(Debug, Deserialize)]
struct TomlWord {
    source: String,
    target: String,
}

/// Read a word list file into entries, in file order.
pub fn parse_word_list(path: &Path) -> Result<Vec<DictionaryEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read word list: {}", path.display()))?;

    let entries = match WordListFormat::from_path(path) {
        WordListFormat::Tsv => parse_tsv_str(&content),
        WordListFormat::Toml => parse_toml_str(&content),
    };
    entries.with_context(|| format!("failed to parse word list: {}", path.display()))
}

/// Parse tab-separated `source<TAB>target` lines. Blank lines and lines
/// starting with `#` are skipped.
pub fn parse_tsv_str(content: &str) -> Result<Vec<DictionaryEntry>> {
    let mut entries = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').map(str::trim).collect();
        match columns.as_slice() {
            [source, target] if !source.is_empty() && !target.is_empty() => {
                entries.push(DictionaryEntry::new(*source, *target));
            }
            _ => anyhow::bail!(
                "line {line_no}: expected two tab-separated columns, found {:?}",
                line
            ),
        }
    }
    Ok(entries)
}

/// Parse a TOML word list.
pub fn parse_toml_str(content: &str) -> Result<Vec<DictionaryEntry>> {
    let parsed: TomlWordList = toml::from_str(content)?;
    parsed
        .words
        .into_iter()
        .enumerate()
        .map(|(i, w)| {
            let source = w.source.trim();
            let target = w.target.trim();
            anyhow::ensure!(
                !source.is_empty() && !target.is_empty(),
                "word {}: source and target must not be empty",
                i + 1
            );
            Ok(DictionaryEntry::new(source, target))
        })
        .collect()
}

/// Read a word list and build the dictionary index from it.
pub fn load_dictionary(path: &Path) -> Result<Dictionary> {
    let entries = parse_word_list(path)?;
    let dictionary = Dictionary::build(entries)
        .with_context(|| format!("no words in {}", path.display()))?;
    tracing::info!(
        words = dictionary.len(),
        "loaded dictionary from {}",
        path.display()
    );
    Ok(dictionary)
}

/// A warning from word list validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based position of the entry in the list.
    pub position: usize,
    /// Warning message.
    pub message: String,
}

/// Check a word list for entries that will behave surprisingly in quizzes.
pub fn validate_entries(entries: &[DictionaryEntry]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen_sources = HashSet::new();
    let mut seen_targets = HashSet::new();

    for (i, entry) in entries.iter().enumerate() {
        let position = i + 1;
        if !seen_targets.insert(entry.target.as_str()) {
            warnings.push(ValidationWarning {
                position,
                message: format!(
                    "duplicate question word {:?}; the last entry's answer is used",
                    entry.target
                ),
            });
        }
        if !seen_sources.insert(entry.source.as_str()) {
            warnings.push(ValidationWarning {
                position,
                message: format!(
                    "duplicate answer word {:?}; mistakes show the last entry's question",
                    entry.source
                ),
            });
        }
        if normalize(&entry.source).trim().is_empty() {
            warnings.push(ValidationWarning {
                position,
                message: format!(
                    "answer {:?} is only punctuation and matches an empty reply",
                    entry.source
                ),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TSV: &str = "# Serbian\tRussian\n\
sobа\tкомната\n\
\n\
Sneško Belić\tснеговик\n\
sređivati sređujem\tубираться, драить\n";

    const VALID_TOML: &str = r#"
[[words]]
source = "sobа"
target = "room"

[[words]]
source = "Srbija (Srbin, Srpkinja)"
target = "Serbia"
"#;

    #[test]
    fn parse_valid_tsv() {
        let entries = parse_tsv_str(VALID_TSV).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], DictionaryEntry::new("sobа", "комната"));
        assert_eq!(entries[2].target, "убираться, драить");
    }

    #[test]
    fn tsv_line_without_tab_is_an_error() {
        let err = parse_tsv_str("soba\troom\nkuća house\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn tsv_empty_column_is_an_error() {
        assert!(parse_tsv_str("soba\t\n").is_err());
        assert!(parse_tsv_str("a\tb\tc\n").is_err());
    }

    #[test]
    fn parse_valid_toml() {
        let entries = parse_toml_str(VALID_TOML).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].source, "Srbija (Srbin, Srpkinja)");
    }

    #[test]
    fn parse_malformed_toml() {
        assert!(parse_toml_str("this is not [valid toml }{").is_err());
        assert!(parse_toml_str("[[words]]\nsource = \"x\"\n").is_err());
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            WordListFormat::from_path(&PathBuf::from("words.TOML")),
            WordListFormat::Toml
        );
        assert_eq!(
            WordListFormat::from_path(&PathBuf::from("words.tsv")),
            WordListFormat::Tsv
        );
        assert_eq!(
            WordListFormat::from_path(&PathBuf::from("words")),
            WordListFormat::Tsv
        );
    }

    #[test]
    fn load_dictionary_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let tsv = dir.path().join("words.tsv");
        let toml = dir.path().join("words.toml");
        std::fs::write(&tsv, VALID_TSV).unwrap();
        std::fs::write(&toml, VALID_TOML).unwrap();

        let dict = load_dictionary(&tsv).unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.source_of("снеговик"), Some("Sneško Belić"));

        let dict = load_dictionary(&toml).unwrap();
        assert_eq!(dict.target_of("sobа"), Some("room"));
    }

    #[test]
    fn empty_or_missing_word_list_fails() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.tsv");
        std::fs::write(&empty, "# nothing here\n").unwrap();
        assert!(load_dictionary(&empty).is_err());
        assert!(load_dictionary(&dir.path().join("missing.tsv")).is_err());
    }

    #[test]
    fn validate_duplicates_and_punctuation() {
        let entries = vec![
            DictionaryEntry::new("sređivati", "tidy up"),
            DictionaryEntry::new("spremati", "tidy up"),
            DictionaryEntry::new("spremati", "prepare"),
            DictionaryEntry::new("?!", "huh"),
        ];
        let warnings = validate_entries(&entries);
        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings[0].position, 2);
        assert!(warnings[0].message.contains("duplicate question"));
        assert!(warnings[1].message.contains("duplicate answer"));
        assert!(warnings[2].message.contains("only punctuation"));
    }

    #[test]
    fn validate_clean_list() {
        let entries = parse_tsv_str(VALID_TSV).unwrap();
        assert!(validate_entries(&entries).is_empty());
    }
}
