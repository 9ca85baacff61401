//! The `polako stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use polako_core::config::load_config_from;
use polako_core::persistence::{JsonFileSink, StateSink};
use polako_core::statistics::{summarize, UserSummary};

pub fn execute(config_path: Option<PathBuf>, state_path: Option<PathBuf>) -> Result<()> {
    let state_path = match state_path {
        Some(path) => path,
        None => load_config_from(config_path.as_deref())?.state_file,
    };

    let Some(state) = JsonFileSink::new(&state_path).load()? else {
        println!("No saved state at {}.", state_path.display());
        return Ok(());
    };

    let rows = summarize(&state);
    if rows.is_empty() {
        println!("No users yet.");
        return Ok(());
    }

    print_table(&rows);
    if let Some(at) = state.saved_at {
        println!("Saved at {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    Ok(())
}

fn print_table(rows: &[UserSummary]) {
    let mut table = Table::new();
    table.set_header(vec!["User", "Name", "Task size", "Answered", "Correct", "Rate"]);

    for row in rows {
        let task_size = if row.task_size == 1 {
            "1 (learning)".to_string()
        } else {
            row.task_size.to_string()
        };
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(&row.name),
            Cell::new(task_size),
            Cell::new(row.answered),
            Cell::new(row.correct),
            Cell::new(
                row.rate
                    .map(|r| format!("{r}%"))
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    println!("{table}");
}
