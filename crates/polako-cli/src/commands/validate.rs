//! The `polako validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use polako_core::parser;
use polako_core::Dictionary;

pub fn execute(dictionary_path: PathBuf) -> Result<()> {
    let entries = parser::parse_word_list(&dictionary_path)?;
    let warnings = parser::validate_entries(&entries);
    let dictionary = Dictionary::build(entries)
        .with_context(|| format!("no words in {}", dictionary_path.display()))?;

    println!(
        "Word list: {} ({} words)",
        dictionary_path.display(),
        dictionary.len()
    );
    for w in &warnings {
        println!("  [#{}] WARNING: {}", w.position, w.message);
    }

    if warnings.is_empty() {
        println!("Word list valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
