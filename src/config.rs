use std::path::PathBuf;

use anyhow::{Context, Result};

/// Overrides the data directory when set.
pub(crate) const DATA_DIR_ENV: &str = "EXPENSE_TRACKER_DIR";
/// `tracing` filter directives, e.g. `debug` or `expense_tracker=info`.
pub(crate) const LOG_ENV: &str = "EXPENSE_TRACKER_LOG";
pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::resolve(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
    }

    /// Use `dir_override` when it is non-empty, otherwise the platform data directory.
    /// The directory is created if it does not exist.
    pub(crate) fn resolve(dir_override: Option<PathBuf>) -> Result<Self> {
        let data_dir = match dir_override.filter(|d| !d.as_os_str().is_empty()) {
            Some(dir) => dir,
            None => directories::ProjectDirs::from("com", "expense-tracker", "ExpenseTracker")
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;
        Ok(Self { data_dir })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_override_is_created() {
        let tmp = tempfile::TempDir::new().unwrap();
        let wanted = tmp.path().join("nested").join("data");
        let config = Config::resolve(Some(wanted.clone())).unwrap();
        assert_eq!(config.data_dir, wanted);
        assert!(wanted.is_dir());
    }

    #[test]
    fn test_existing_override_is_kept() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config::resolve(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(config.data_dir, tmp.path());
    }
}
