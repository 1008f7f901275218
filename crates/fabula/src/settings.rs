//! Runner configuration.
//!
//! Settings are layered, later sources winning: the optional TOML file, then
//! `FABULA_*` environment variables, then command-line flags.

use derive_getters::Getters;
use fabula_error::{ConfigError, ConfigErrorKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Configuration file read from the working directory when none is given.
pub const CONFIG_FILE: &str = "fabula.toml";

/// Prefix of configuration environment variables (`FABULA_ENDPOINT`, ...).
pub const ENV_PREFIX: &str = "FABULA";

/// Settings shared by every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct RunnerConfig {
    /// Base URL of the API under test, handed to the driver factory
    endpoint: Option<String>,

    /// Directory transcripts are written to; no transcripts when absent
    transcripts_dir: Option<PathBuf>,

    /// Commit of the API under test, recorded in the transcript index
    commit: Option<String>,
}

impl RunnerConfig {
    /// Loads a TOML file on its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(ConfigErrorKind::Read(e.to_string())))?;
        toml::from_str(&content)
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
    }

    /// Loads the layered configuration from the process environment.
    ///
    /// Without `path`, [`CONFIG_FILE`] is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or any source is
    /// malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Loads the layered configuration, reading variables from `env`
    /// instead of the process environment when given.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or any source is
    /// malformed.
    #[instrument(skip(env))]
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(true),
            None => config::File::from(Path::new(CONFIG_FILE))
                .format(config::FileFormat::Toml)
                .required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(env))
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Invalid(e.to_string())))?;
        debug!(config = ?loaded, "Configuration loaded");
        Ok(loaded)
    }

    /// Applies command-line overrides; absent values keep the loaded ones.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        transcripts_dir: Option<PathBuf>,
        commit: Option<String>,
    ) -> Self {
        if endpoint.is_some() {
            self.endpoint = endpoint;
        }
        if transcripts_dir.is_some() {
            self.transcripts_dir = transcripts_dir;
        }
        if commit.is_some() {
            self.commit = commit;
        }
        self
    }
}
