//! Configuration loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_TASK_SIZE;

/// Top-level polako configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolakoConfig {
    /// Word list the dictionary is built from (`.tsv`, `.txt` or `.toml`).
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,
    /// Where user state is saved.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
    /// Seconds between state saves.
    #[serde(default = "default_save_interval")]
    pub save_interval_secs: u64,
    /// Write state through a temporary file and rename it into place.
    #[serde(default = "default_true")]
    pub atomic_writes: bool,
    /// Words per task for new users.
    #[serde(default = "default_task_size")]
    pub default_task_size: usize,
}

fn default_dictionary() -> PathBuf {
    PathBuf::from("dictionary.tsv")
}
fn default_state_file() -> PathBuf {
    PathBuf::from("users.json")
}
fn default_save_interval() -> u64 {
    60
}
fn default_true() -> bool {
    true
}
fn default_task_size() -> usize {
    DEFAULT_TASK_SIZE
}

impl Default for PolakoConfig {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            state_file: default_state_file(),
            save_interval_secs: default_save_interval(),
            atomic_writes: true,
            default_task_size: default_task_size(),
        }
    }
}

impl PolakoConfig {
    pub fn save_interval(&self) -> Duration {
        Duration::from_secs(self.save_interval_secs)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.save_interval_secs >= 1,
            "save_interval_secs must be at least 1"
        );
        anyhow::ensure!(
            self.default_task_size >= 1,
            "default_task_size must be at least 1"
        );
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    expand_vars(s, |name| std::env::var(name).ok())
}

/// Single left-to-right pass: substituted values are not scanned again, so a
/// value containing `${...}` is kept literally. Unset variables expand to "".
fn expand_vars(s: &str, var: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&var(&rest[start + 2..start + end]).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Apply `POLAKO_DICTIONARY` / `POLAKO_STATE_FILE` overrides and resolve
/// `${VAR}` references in paths.
fn apply_env(mut config: PolakoConfig, var: impl Fn(&str) -> Option<String>) -> PolakoConfig {
    if let Some(path) = var("POLAKO_DICTIONARY") {
        config.dictionary = PathBuf::from(path);
    }
    if let Some(path) = var("POLAKO_STATE_FILE") {
        config.state_file = PathBuf::from(path);
    }
    config.dictionary = resolve_path(&config.dictionary);
    config.state_file = resolve_path(&config.state_file);
    config
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `polako.toml` in the current directory
/// 2. `~/.config/polako/config.toml`
///
/// Environment variable overrides: `POLAKO_DICTIONARY`, `POLAKO_STATE_FILE`.
pub fn load_config() -> Result<PolakoConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PolakoConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("polako.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PolakoConfig::default(),
    };

    let config = apply_env(config, |name| std::env::var(name).ok());
    config.validate()?;
    Ok(config)
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Result<PolakoConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("polako"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_POLAKO_TEST_VAR", "data");
        assert_eq!(resolve_env_vars("${_POLAKO_TEST_VAR}"), "data");
        assert_eq!(
            resolve_env_vars("/srv/${_POLAKO_TEST_VAR}/users.json"),
            "/srv/data/users.json"
        );
        assert_eq!(resolve_env_vars("no-vars"), "no-vars");
        std::env::remove_var("_POLAKO_TEST_VAR");
    }

    #[test]
    fn self_referencing_value_is_not_expanded_again() {
        let var = |name: &str| match name {
            "LOOP" => Some("${LOOP}/x".to_string()),
            "DIR" => Some("/srv".to_string()),
            _ => None,
        };
        assert_eq!(expand_vars("${LOOP}", var), "${LOOP}/x");
        assert_eq!(expand_vars("${DIR}/${LOOP}", var), "/srv/${LOOP}/x");
        assert_eq!(expand_vars("${MISSING}/a", var), "/a");
        assert_eq!(expand_vars("${DIR}/${unclosed", var), "/srv/${unclosed");
    }

    #[test]
    fn default_config() {
        let config = PolakoConfig::default();
        assert_eq!(config.state_file, PathBuf::from("users.json"));
        assert_eq!(config.save_interval(), Duration::from_secs(60));
        assert_eq!(config.default_task_size, 10);
        assert!(config.atomic_writes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(
            r#"
dictionary = "words/serbian.tsv"
save_interval_secs = 300
atomic_writes = false
"#,
        )
        .unwrap();
        assert_eq!(config.dictionary, PathBuf::from("words/serbian.tsv"));
        assert_eq!(config.state_file, PathBuf::from("users.json"));
        assert_eq!(config.save_interval_secs, 300);
        assert!(!config.atomic_writes);
    }

    #[test]
    fn zero_interval_is_invalid() {
        let config = parse_config("save_interval_secs = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_overrides_paths() {
        let config = apply_env(PolakoConfig::default(), |name| match name {
            "POLAKO_STATE_FILE" => Some("/var/lib/polako/users.json".into()),
            _ => None,
        });
        assert_eq!(config.state_file, PathBuf::from("/var/lib/polako/users.json"));
        assert_eq!(config.dictionary, PathBuf::from("dictionary.tsv"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/polako.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polako.toml");
        std::fs::write(&path, "default_task_size = 5\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_task_size, 5);
    }
}
