//! Unified path management for cropadv configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/cropadv/           # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── logs/                    # Application logs
//!     └── cropadv.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

use cropadv_core::{AdvisoryError, Result};

const APP_DIR: &str = "cropadv";
const CONFIG_FILE: &str = "config.toml";
const LOG_DIR: &str = "logs";

/// Resolves where the client keeps its files.
pub struct AdvisoryPaths;

impl AdvisoryPaths {
    /// Returns the cropadv configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/cropadv/`)
    /// - `Err(AdvisoryError::Config)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|base| base.join(APP_DIR))
            .ok_or_else(|| AdvisoryError::config("Cannot find home directory"))
    }

    /// Returns the default path of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Returns the log directory.
    pub fn log_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(LOG_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_the_app_directory() {
        let Ok(dir) = AdvisoryPaths::config_dir() else {
            // No home directory in this environment.
            return;
        };
        assert!(dir.ends_with(APP_DIR));
        assert_eq!(AdvisoryPaths::config_file().unwrap(), dir.join("config.toml"));
        assert_eq!(AdvisoryPaths::log_dir().unwrap(), dir.join("logs"));
    }
}
