//! Snapshot persistence for the user store.
//!
//! The whole store is written as one JSON document and overwritten on every
//! save. With atomic writes enabled the document goes to a temporary file in
//! the same directory first and is renamed into place, so a crash mid-write
//! leaves the previous snapshot intact.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tempfile::NamedTempFile;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::PersistError;
use crate::model::PersistedState;
use crate::store::UserStore;

/// Durable storage for store snapshots.
pub trait StateSink: Send + Sync {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Read the last saved snapshot. `Ok(None)` means nothing was saved yet.
    fn load(&self) -> Result<Option<PersistedState>, PersistError>;

    /// Overwrite the stored snapshot.
    fn save(&self, state: &PersistedState) -> Result<(), PersistError>;
}

/// A single JSON file on local disk.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
    atomic: bool,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            atomic: true,
        }
    }

    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomic(&self, bytes: &[u8]) -> Result<(), PersistError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| self.io_error(e))?;
        temp.write_all(bytes).map_err(|e| self.io_error(e))?;
        temp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        temp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

impl StateSink for JsonFileSink {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Option<PersistedState>, PersistError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| PersistError::Malformed {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, state: &PersistedState) -> Result<(), PersistError> {
        let bytes = serde_json::to_vec_pretty(state)?;
        if self.atomic {
            self.write_atomic(&bytes)
        } else {
            fs::write(&self.path, bytes).map_err(|e| self.io_error(e))
        }
    }
}

/// What [`restore`] found in the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing was saved yet; the store starts empty.
    Empty,
    /// The store was replaced with the saved snapshot.
    Loaded { users: usize, tasks: usize },
    /// The saved snapshot could not be read; the store starts empty.
    Discarded,
}

/// Load the sink's snapshot into `store`. Never fails: unreadable or
/// malformed state is logged and the store is left empty.
pub fn restore(store: &UserStore, sink: &dyn StateSink) -> RestoreOutcome {
    match sink.load() {
        Ok(None) => {
            tracing::info!("no saved state at {}, starting empty", sink.describe());
            RestoreOutcome::Empty
        }
        Ok(Some(state)) => {
            let users = state.users.len();
            let tasks = state.tasks.len();
            match state.saved_at {
                Some(at) => tracing::info!(users, tasks, saved_at = %at, "restored saved state"),
                None => tracing::info!(users, tasks, "restored saved state"),
            }
            store.restore(state);
            RestoreOutcome::Loaded { users, tasks }
        }
        Err(e) => {
            tracing::warn!("discarding saved state: {e}");
            RestoreOutcome::Discarded
        }
    }
}

/// Snapshot the store and write it to the sink. The store lock is only held
/// while copying.
pub fn persist_once(store: &UserStore, sink: &dyn StateSink) -> Result<(), PersistError> {
    let mut snapshot = store.snapshot();
    snapshot.saved_at = Some(Utc::now());
    sink.save(&snapshot)
}

/// [`persist_once`] on the blocking thread pool.
pub async fn persist_blocking(
    store: Arc<UserStore>,
    sink: Arc<dyn StateSink>,
) -> Result<(), PersistError> {
    tokio::task::spawn_blocking(move || persist_once(&store, sink.as_ref()))
        .await
        .map_err(|e| PersistError::TaskJoin(e.to_string()))?
}

/// Periodically saves the store until shut down.
///
/// Failed saves are logged and retried on the next tick. Dropping the
/// scheduler stops the timer without a final save; call
/// [`shutdown`](Self::shutdown) to flush.
pub struct PersistenceScheduler {
    store: Arc<UserStore>,
    sink: Arc<dyn StateSink>,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl PersistenceScheduler {
    /// Start saving every `interval` on the current tokio runtime. The first
    /// save happens one interval after start.
    pub fn spawn(store: Arc<UserStore>, sink: Arc<dyn StateSink>, interval: Duration) -> Self {
        let (stop, mut stopped) = oneshot::channel::<()>();
        let period = interval.max(Duration::from_millis(1));
        let loop_store = Arc::clone(&store);
        let loop_sink = Arc::clone(&sink);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match persist_blocking(Arc::clone(&loop_store), Arc::clone(&loop_sink)).await {
                            Ok(()) => tracing::debug!("saved state to {}", loop_sink.describe()),
                            Err(e) => tracing::error!("failed to save state: {e}"),
                        }
                    }
                    _ = &mut stopped => break,
                }
            }
        });

        tracing::info!(
            "saving state to {} every {}s",
            sink.describe(),
            period.as_secs_f64()
        );
        Self {
            store,
            sink,
            stop,
            handle,
        }
    }

    /// Stop the timer and write one final snapshot.
    pub async fn shutdown(self) -> Result<(), PersistError> {
        let Self {
            store,
            sink,
            stop,
            handle,
        } = self;
        let _ = stop.send(());
        if let Err(e) = handle.await {
            tracing::warn!("persistence loop ended abnormally: {e}");
        }
        persist_blocking(store, sink).await
    }
}
