//! The `polako init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("polako.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("dictionary.tsv"), SAMPLE_DICTIONARY)?;

    println!("\nNext steps:");
    println!("  1. Replace dictionary.tsv with your own word list");
    println!("  2. Run: polako validate --dictionary dictionary.tsv");
    println!("  3. Run: polako run");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# polako configuration

# Word list: .tsv (answer<TAB>question per line) or .toml ([[words]] tables)
dictionary = "dictionary.tsv"

# Where user progress is saved
state_file = "users.json"
save_interval_secs = 60
atomic_writes = true

# Words per task for new users (1 = learning mode)
default_task_size = 10
"#;

const SAMPLE_DICTIONARY: &str = "# answer\tquestion
soba\troom
kuća\thouse
Sneško Belić\tsnowman
sportski građen\tathletic build
Srbija (Srbin, Srpkinja)\tSerbia (Serb, Serbian woman)
sređivati sređujem\ttidy up, calm down
hleb\tbread
voda\twater
jabuka\tapple
prozor\twindow
vrata\tdoor
sto\ttable
";
