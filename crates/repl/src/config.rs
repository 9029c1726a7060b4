//! Shell configuration
//!
//! ```rust,ignore
//! let config = ShellConfig::new().with_history_file("/tmp/rpnc_history");
//! let shell = Shell::open(&config)?;
//! ```

use std::path::{Path, PathBuf};

/// Directory under the per-user state directory that holds the history
const APP_DIR: &str = "rpnc";
const HISTORY_FILE: &str = "history";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Where command history is loaded from and saved to; `None` disables it
    pub history_file: Option<PathBuf>,
}

impl ShellConfig {
    /// Configuration with history at the default per-user location
    pub fn new() -> Self {
        ShellConfig {
            history_file: default_history_file(),
        }
    }

    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file = Some(path.into());
        self
    }

    pub fn without_history(mut self) -> Self {
        self.history_file = None;
        self
    }

    /// Create the history file's directory
    ///
    /// Returns the usable history path, or `None` when history is disabled or
    /// its directory cannot be created. In the latter case a notice is
    /// printed and the session carries on without history.
    pub fn prepare_history(&self) -> Option<PathBuf> {
        let path = self.history_file.as_ref()?;
        let dir = path.parent().unwrap_or(Path::new("."));
        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::warn!("cannot create {}: {}", dir.display(), e);
            println!(
                "history disabled due to inability to create directory: {}",
                dir.display()
            );
            return None;
        }
        Some(path.clone())
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig::new()
    }
}

/// `<state dir>/rpnc/history`, falling back to the local data directory on
/// platforms without a state directory
fn default_history_file() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|d| d.join(APP_DIR).join(HISTORY_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builder() {
        let config = ShellConfig::new().with_history_file("/tmp/h");
        assert_eq!(config.history_file, Some(PathBuf::from("/tmp/h")));

        let config = config.without_history();
        assert_eq!(config.history_file, None);
    }

    #[test]
    fn test_default_path_layout() {
        if let Some(path) = ShellConfig::new().history_file {
            assert!(path.ends_with("rpnc/history"));
        }
    }

    #[test]
    fn test_prepare_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dir").join("history");
        let config = ShellConfig::new().with_history_file(&path);

        assert_eq!(config.prepare_history(), Some(path.clone()));
        assert!(tmp.path().join("nested").join("dir").is_dir());
    }

    #[test]
    fn test_prepare_fails_when_parent_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let config = ShellConfig::new().with_history_file(blocker.join("history"));

        assert_eq!(config.prepare_history(), None);
    }

    #[test]
    fn test_prepare_without_history() {
        assert_eq!(ShellConfig::new().without_history().prepare_history(), None);
    }
}
