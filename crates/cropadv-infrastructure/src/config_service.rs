//! Configuration service implementation.
//!
//! Loads [`RootConfig`] from `config.toml` (by default
//! `~/.config/cropadv/config.toml`), then applies environment overrides.
//! A missing file means defaults; a malformed one is an error.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use cropadv_core::config::RootConfig;
use cropadv_core::{AdvisoryError, Language, Result};

use crate::paths::AdvisoryPaths;

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "CROPADV_API_URL";
/// Accepted as well, for deployments configured for the web frontend.
pub const ENV_LEGACY_API_URL: &str = "REACT_APP_API_URL";
/// Overrides `ui.default_language`.
pub const ENV_LANGUAGE: &str = "CROPADV_LANGUAGE";

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` means the default location.
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading `path` instead of the default file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        if let Some(cached) = self.read_cache()? {
            return Ok(cached);
        }

        let path = self.config_path()?;
        let mut loaded = load_file(&path)?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());
        tracing::info!(
            "[Config] Loaded {:?} (api: {})",
            path,
            loaded.api.base_url
        );

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| AdvisoryError::internal("config cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// The file this service reads.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => AdvisoryPaths::config_file(),
        }
    }

    fn read_cache(&self) -> Result<Option<RootConfig>> {
        let read_lock = self
            .config
            .read()
            .map_err(|_| AdvisoryError::internal("config cache lock poisoned"))?;
        Ok(read_lock.clone())
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

fn load_file(path: &Path) -> Result<RootConfig> {
    if !path.exists() {
        tracing::debug!("[Config] {:?} not found, using defaults", path);
        return Ok(RootConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| {
        AdvisoryError::config(format!(
            "Failed to parse configuration file at {}: {}",
            path.display(),
            err
        ))
    })
}

/// Applies environment overrides on top of the file values.
///
/// `CROPADV_API_URL` wins over `REACT_APP_API_URL`. An unrecognized language
/// tag falls back to English, like every other language lookup.
fn apply_env_overrides<F>(config: &mut RootConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = non_empty(ENV_API_URL).or_else(|| non_empty(ENV_LEGACY_API_URL)) {
        config.api.base_url = url.trim().to_string();
    }
    if let Some(tag) = non_empty(ENV_LANGUAGE) {
        config.ui.default_language = Language::from_tag_or_default(&tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, RootConfig::default());
    }

    #[test]
    fn reads_values_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://advisory.internal:9000\"\n\n[chat]\nhandoff_delay_ms = 0"
        )
        .unwrap();

        let service = ConfigService::with_path(file.path());
        let config = service.get_config().unwrap();

        assert_eq!(config.api.base_url, "http://advisory.internal:9000");
        assert_eq!(config.chat.handoff_delay_ms, 0);
        assert_eq!(config.chat.greeting, "hello");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();

        let err = ConfigService::with_path(file.path()).get_config().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn cache_survives_file_changes_until_invalidated() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chat]\ngreeting = \"namaste\"").unwrap();
        let service = ConfigService::with_path(file.path());
        assert_eq!(service.get_config().unwrap().chat.greeting, "namaste");

        std::fs::write(file.path(), "[chat]\ngreeting = \"ram ram\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().chat.greeting, "namaste");

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().chat.greeting, "ram ram");
    }

    #[test]
    fn env_overrides_win_over_file() {
        let mut config = RootConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_API_URL, "http://primary:8000"),
                (ENV_LEGACY_API_URL, "http://legacy:8000"),
                (ENV_LANGUAGE, "mr"),
            ]),
        );
        assert_eq!(config.api.base_url, "http://primary:8000");
        assert_eq!(config.ui.default_language, Language::Mr);
    }

    #[test]
    fn legacy_url_is_used_when_primary_is_blank() {
        let mut config = RootConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[(ENV_API_URL, "  "), (ENV_LEGACY_API_URL, "http://legacy:8000")]),
        );
        assert_eq!(config.api.base_url, "http://legacy:8000");
    }

    #[test]
    fn unknown_language_override_falls_back_to_english() {
        let mut config = RootConfig::default();
        config.ui.default_language = Language::Hi;
        apply_env_overrides(&mut config, env(&[(ENV_LANGUAGE, "klingon")]));
        assert_eq!(config.ui.default_language, Language::En);
    }
}
