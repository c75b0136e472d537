use std::{
    env::consts,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Engine every binary target embeds.
pub const QUERY_ENGINE: &str = "query-engine";

///
/// EngineError
///

#[derive(Debug, ThisError)]
pub enum EngineError {
    #[error("engine binary not found at {path}")]
    NotFound { path: PathBuf },

    #[error("engine binary at {path} is not accessible: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

///
/// EngineSource
///
/// Makes engine binaries available on disk. Downloading, caching and
/// checksum verification are up to the implementation.
///

pub trait EngineSource {
    /// Ensure the binary for `engine` on `platform` exists under `cache_dir`.
    fn fetch_engine(&self, cache_dir: &Path, engine: &str, platform: &str)
    -> Result<(), EngineError>;

    /// Where [`EngineSource::fetch_engine`] leaves the binary.
    fn engine_path(&self, cache_dir: &Path, engine: &str, platform: &str) -> PathBuf;
}

///
/// Platform
///

pub trait Platform {
    /// Platform identifier the `native` target stands for.
    fn binary_platform_name(&self) -> String;
}

///
/// LocalCache
/// binaries placed in the cache directory ahead of time
///

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalCache;

impl EngineSource for LocalCache {
    fn fetch_engine(
        &self,
        cache_dir: &Path,
        engine: &str,
        platform: &str,
    ) -> Result<(), EngineError> {
        let path = self.engine_path(cache_dir, engine, platform);

        match path.try_exists() {
            Ok(true) => Ok(()),
            Ok(false) => Err(EngineError::NotFound { path }),
            Err(source) => Err(EngineError::Io { path, source }),
        }
    }

    fn engine_path(&self, cache_dir: &Path, engine: &str, platform: &str) -> PathBuf {
        let mut file = format!("{engine}-{platform}");
        if platform == "windows" {
            file.push_str(".exe");
        }

        cache_dir.join(file)
    }
}

///
/// HostPlatform
/// names the platform the generator is running on
///

#[derive(Clone, Copy, Debug, Default)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn binary_platform_name(&self) -> String {
        match (consts::OS, consts::ARCH) {
            ("macos", "aarch64") => "darwin-arm64".to_string(),
            ("macos", _) => "darwin".to_string(),
            (os, _) => os.to_string(),
        }
    }
}

///
/// TESTS
///
