//! Front-end configuration from the environment.
//!
//! Values come from the process environment, after loading `.env` from the
//! working directory and `usertable.env` from the config directory. Neither
//! file is required.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use simplelog::LevelFilter;
use thiserror::Error;
use usertable_lib::LoadError;
use usertable_lib::source::{FileSource, HttpSource, RecordSource};

use crate::paths;

pub const SOURCE_VAR: &str = "USERTABLE_SOURCE";
pub const LOG_LEVEL_VAR: &str = "USERTABLE_LOG_LEVEL";
pub const TIMEOUT_VAR: &str = "USERTABLE_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no data source: set {SOURCE_VAR} or pass a URL or file path")]
    MissingSource,
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("failed to load {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    #[error("invalid data source: {0}")]
    Source(#[from] LoadError),
}

/// Where to load the records from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Url(String),
    File(PathBuf),
}

impl SourceConfig {
    fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub log_level: LevelFilter,
    pub timeout: Duration,
}

impl Config {
    /// Load env files, then read the configuration from the environment.
    ///
    /// `source_arg` (the first command-line argument) overrides the source.
    pub fn load(source_arg: Option<String>) -> Result<Self, ConfigError> {
        load_env_file(None)?;
        if let Some(path) = paths::env_file() {
            load_env_file(Some(path))?;
        }
        Self::from_lookup(source_arg, |var| std::env::var(var).ok())
    }

    fn from_lookup(
        source_arg: Option<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let source = source_arg
            .or_else(|| lookup(SOURCE_VAR))
            .filter(|s| !s.trim().is_empty())
            .map(|s| SourceConfig::parse(s.trim()))
            .ok_or(ConfigError::MissingSource)?;

        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(value) => LevelFilter::from_str(value.trim()).map_err(|_| ConfigError::Invalid {
                var: LOG_LEVEL_VAR,
                value,
                reason: "expected off, error, warn, info, debug or trace".into(),
            })?,
            None => LevelFilter::Info,
        };

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: TIMEOUT_VAR,
                        value,
                        reason: "expected a positive number of seconds".into(),
                    });
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            source,
            log_level,
            timeout,
        })
    }

    /// Build the record source this configuration names.
    pub fn record_source(&self) -> Result<Box<dyn RecordSource>, ConfigError> {
        let source: Box<dyn RecordSource> = match &self.source {
            SourceConfig::Url(url) => Box::new(HttpSource::new(url)?.timeout(self.timeout)),
            SourceConfig::File(path) => Box::new(FileSource::new(path)),
        };
        Ok(source)
    }
}

/// Load an env file; `None` means `.env` in the working directory.
/// A missing file is not an error.
fn load_env_file(path: Option<PathBuf>) -> Result<(), ConfigError> {
    let result = match &path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(source) => Err(ConfigError::EnvFile {
            path: path.unwrap_or_else(|| PathBuf::from(".env")),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(arg: Option<&str>, vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(arg.map(String::from), |k| vars.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(None, &[(SOURCE_VAR, "https://example.com/users.json")]).unwrap();
        assert_eq!(
            config.source,
            SourceConfig::Url("https://example.com/users.json".into())
        );
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_argument_overrides_env() {
        let config = load(Some("users.json"), &[(SOURCE_VAR, "https://example.com")]).unwrap();
        assert_eq!(config.source, SourceConfig::File("users.json".into()));
    }

    #[test]
    fn test_missing_source() {
        assert!(matches!(load(None, &[]), Err(ConfigError::MissingSource)));
        assert!(matches!(
            load(None, &[(SOURCE_VAR, "  ")]),
            Err(ConfigError::MissingSource)
        ));
    }

    #[test]
    fn test_log_level() {
        let config = load(Some("x.json"), &[(LOG_LEVEL_VAR, "DEBUG")]).unwrap();
        assert_eq!(config.log_level, LevelFilter::Debug);
        let err = load(Some("x.json"), &[(LOG_LEVEL_VAR, "loud")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: LOG_LEVEL_VAR, .. }));
    }

    #[test]
    fn test_timeout() {
        let config = load(Some("x.json"), &[(TIMEOUT_VAR, "5")]).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        for bad in ["0", "-1", "soon"] {
            let err = load(Some("x.json"), &[(TIMEOUT_VAR, bad)]).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { var: TIMEOUT_VAR, .. }));
        }
    }

    #[test]
    fn test_record_source() {
        let config = load(Some("https://example.com/users.json"), &[]).unwrap();
        assert_eq!(
            config.record_source().unwrap().describe(),
            "https://example.com/users.json"
        );
        let config = load(Some("http://[bad"), &[]).unwrap();
        assert!(matches!(config.record_source(), Err(ConfigError::Source(_))));
    }
}
