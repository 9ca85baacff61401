//! The `polako run` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use polako_core::config::load_config_from;
use polako_core::parser;
use polako_core::persistence::{self, JsonFileSink, PersistenceScheduler, StateSink};
use polako_core::{Dispatcher, QuizEngine, UserId, UserStore};

use crate::console::ConsoleTransport;

pub async fn execute(config_path: Option<PathBuf>, user_id: UserId, name: String) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    // Without a dictionary there is nothing to quiz on.
    let dictionary = parser::load_dictionary(&config.dictionary)?;

    let store = Arc::new(UserStore::with_default_task_size(config.default_task_size));
    let sink: Arc<dyn StateSink> = Arc::new(
        JsonFileSink::new(&config.state_file).with_atomic_writes(config.atomic_writes),
    );
    persistence::restore(&store, sink.as_ref());

    let scheduler =
        PersistenceScheduler::spawn(Arc::clone(&store), Arc::clone(&sink), config.save_interval());

    let dispatcher = Dispatcher::new(QuizEngine::new(Arc::new(dictionary), store));
    let transport = ConsoleTransport::new(user_id, name);

    tokio::select! {
        served = transport.serve(&dispatcher, tokio::io::stdin(), tokio::io::stdout()) => {
            let handled = served?;
            tracing::debug!(handled, "input closed");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
        }
    }

    scheduler
        .shutdown()
        .await
        .with_context(|| format!("failed to save state to {}", config.state_file.display()))?;
    Ok(())
}
