//! Configuration file loading and resolution.
//!
//! Settings are resolved in order: command-line flags, environment
//! variables (through clap), the JSON config file, built-in defaults.
//! The config file lives at `<config dir>/searchdeck/config.json`:
//!
//! ```json
//! {
//!   "debounce_ms": 300,
//!   "sources": {
//!     "timeout_secs": 5,
//!     "keys": { "openweather": "...", "tmdb": "...", "newsapi": "..." }
//!   }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use searchdeck_core::{ControllerConfig, DEFAULT_DEBOUNCE};
use searchdeck_sources::SourceConfig;
use serde::Deserialize;
use thiserror::Error;

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid config JSON.
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Contents of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Debounce window in milliseconds.
    pub debounce_ms: u64,
    /// Abort superseded requests.
    pub abort_superseded: bool,
    /// Source settings.
    pub sources: SourceConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            abort_superseded: true,
            sources: SourceConfig::default(),
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Debounce window in milliseconds.
    pub debounce_ms: Option<u64>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// OpenWeatherMap key.
    pub openweather_key: Option<String>,
    /// TMDB key.
    pub tmdb_key: Option<String>,
    /// NewsAPI key.
    pub newsapi_key: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Controller tuning.
    pub controller: ControllerConfig,
    /// Source settings.
    pub sources: SourceConfig,
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("searchdeck").join("config.json"))
}

/// Load the config file.
///
/// An explicit `path` must exist. Without one, the default location is used
/// if present, and built-in defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(p) => p,
            None => return Ok(FileConfig::default()),
        },
    };

    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Apply command-line overrides on top of the file config.
pub fn resolve(file: FileConfig, overrides: Overrides) -> Settings {
    let mut sources = file.sources;
    if let Some(timeout) = overrides.timeout_secs {
        sources.timeout_secs = timeout;
    }
    if overrides.openweather_key.is_some() {
        sources.keys.openweather = overrides.openweather_key;
    }
    if overrides.tmdb_key.is_some() {
        sources.keys.tmdb = overrides.tmdb_key;
    }
    if overrides.newsapi_key.is_some() {
        sources.keys.newsapi = overrides.newsapi_key;
    }

    let debounce_ms = overrides.debounce_ms.unwrap_or(file.debounce_ms);
    let controller = ControllerConfig::default()
        .with_debounce(Duration::from_millis(debounce_ms))
        .with_abort_superseded(file.abort_superseded);

    Settings {
        controller,
        sources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"debounce_ms": 250, "sources": {{"keys": {{"tmdb": "from-file"}}}}}}"#
        )
        .unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert!(config.abort_superseded);
        assert_eq!(config.sources.keys.tmdb.as_deref(), Some("from-file"));
        assert_eq!(config.sources.timeout_secs, 10);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides_win() {
        let mut file = FileConfig::default();
        file.sources.keys.tmdb = Some("from-file".to_string());
        file.sources.keys.newsapi = Some("news-from-file".to_string());

        let settings = resolve(
            file,
            Overrides {
                debounce_ms: Some(100),
                timeout_secs: Some(2),
                tmdb_key: Some("from-flag".to_string()),
                ..Overrides::default()
            },
        );

        assert_eq!(settings.controller.debounce, Duration::from_millis(100));
        assert_eq!(settings.sources.timeout_secs, 2);
        assert_eq!(settings.sources.keys.tmdb.as_deref(), Some("from-flag"));
        assert_eq!(settings.sources.keys.newsapi.as_deref(), Some("news-from-file"));
    }

    #[test]
    fn test_defaults() {
        let settings = resolve(FileConfig::default(), Overrides::default());
        assert_eq!(settings.controller, ControllerConfig::default());
        assert_eq!(settings.sources, SourceConfig::default());
    }
}
