//! Generator configuration.
//!
//! [`GeneratorConfig`] is what the caller hands over, with every option
//! optional. [`apply_defaults`] turns it into a fully populated [`Settings`]
//! value; nothing downstream ever sees an unset option.

mod flag;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Module name used when the configuration leaves `package` unset.
pub const DEFAULT_PACKAGE: &str = "db";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse toml config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("could not parse json config: {0}")]
    Json(#[from] serde_json::Error),
}

///
/// EngineType
/// how the generated client reaches the query engine
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    /// Spawn the embedded engine binary.
    #[default]
    #[display("binary")]
    Binary,

    /// Load the engine as a shared library.
    #[display("library")]
    Library,

    /// Talk to a remote proxy; no local binary is needed.
    #[serde(alias = "dataProxy")]
    #[display("dataproxy")]
    DataProxy,
}

///
/// GeneratorConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Destination directory for every generated file.
    pub output: PathBuf,

    /// Name of the generated module.
    pub package: Option<String>,

    /// Platform identifiers to embed engines for, in order.
    pub binary_targets: Vec<String>,

    #[serde(alias = "disableGoBinaries", deserialize_with = "flag::deserialize")]
    pub disable_binaries: bool,

    #[serde(deserialize_with = "flag::deserialize")]
    pub disable_gitignore: bool,

    pub engine_type: EngineType,

    /// Overrides the built-in template directory.
    pub template_dir: Option<PathBuf>,

    /// Where engine binaries are looked up.
    pub cache_dir: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load configuration from a file; `.json` files are read as JSON,
    /// everything else as TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }
}

///
/// Settings
/// a [`GeneratorConfig`] with every default applied
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub output: PathBuf,
    pub package: String,
    pub binary_targets: Vec<String>,
    pub disable_binaries: bool,
    pub disable_gitignore: bool,
    pub engine_type: EngineType,
    pub template_dir: Option<PathBuf>,
    pub cache_dir: PathBuf,
}

impl Settings {
    /// Engine files are generated unless disabled or served by a proxy.
    #[must_use]
    pub fn embeds_engines(&self) -> bool {
        !self.disable_binaries && self.engine_type != EngineType::DataProxy
    }

    /// The ignore file lists engine files, so it follows the binary switch.
    #[must_use]
    pub const fn writes_gitignore(&self) -> bool {
        !self.disable_binaries && !self.disable_gitignore
    }
}

/// Fill every unset option with its canonical default.
#[must_use]
pub fn apply_defaults(config: &GeneratorConfig) -> Settings {
    let package = config
        .package
        .as_deref()
        .filter(|package| !package.is_empty())
        .unwrap_or(DEFAULT_PACKAGE)
        .to_string();

    let cache_dir = config.cache_dir.clone().unwrap_or_else(default_cache_dir);

    Settings {
        output: config.output.clone(),
        package,
        binary_targets: config.binary_targets.clone(),
        disable_binaries: config.disable_binaries,
        disable_gitignore: config.disable_gitignore,
        engine_type: config.engine_type,
        template_dir: config.template_dir.clone(),
        cache_dir,
    }
}

/// `<user cache dir>/qgen/binaries`, or a relative fallback when the
/// platform has no cache directory.
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("qgen")
        .join("binaries")
}

///
/// TESTS
///
