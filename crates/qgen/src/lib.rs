//! ## Crate layout
//! - `bindata`: engine binaries embedded as platform-gated source files.
//! - `build`: template rendering and the generation pipeline.
//! - `config`: generator configuration and defaulting.
//! - `schema`: the DMMF document, validation, and the resolved AST.
//!
//! [`generate`] runs the whole pipeline from a JSON request using engines
//! already present in the cache directory.

pub use qgen_bindata as bindata;
pub use qgen_build as build;
pub use qgen_config as config;
pub use qgen_schema as schema;

use qgen_build::{GeneratorInput, HostPlatform, LocalCache, Report, RunError};
use thiserror::Error as ThisError;
use tracing::info;

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("could not parse generator input: {0}")]
    Input(#[from] serde_json::Error),

    #[error(transparent)]
    Run(#[from] RunError),
}

/// Parse a `{ "generator": ..., "dmmf": ... }` request and run it.
pub fn generate(json: &str) -> Result<Report, Error> {
    let input: GeneratorInput = serde_json::from_str(json)?;
    let report = qgen_build::run(&input, &LocalCache, &HostPlatform)?;

    info!(
        client = %report.client.display(),
        engines = report.engines.len(),
        "generation finished"
    );

    Ok(report)
}

///
/// TESTS
///
