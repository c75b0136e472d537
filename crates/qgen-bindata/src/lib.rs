//! Embeds query-engine binaries into platform-gated Rust source files.
//!
//! Each generated file holds one engine as a byte-string literal, a `cfg`
//! gate so it only compiles for the matching target, and a start-up hook
//! that hands the bytes to the runtime's unpacker.

mod gate;
mod write;

pub use gate::{LINUX_VARIANTS, cfg_ident, gate, platform_family};
pub use write::write_file;

use std::{
    fmt::{self, Display},
    path::PathBuf,
};
use thiserror::Error as ThisError;

/// Runtime crate the generated files call into.
pub const RUNTIME_CRATE: &str = "qgen_client";

/// Prefix shared by every generated engine file.
pub const FILE_PREFIX: &str = "query_engine_";

///
/// BindataError
///

#[derive(Debug, ThisError)]
pub enum BindataError {
    #[error("could not open engine artifact {path}: {source}")]
    OpenArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read engine artifact {path}: {source}")]
    ReadArtifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not create engine file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write engine file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not build header for platform '{name}': {source}")]
    Header {
        name: String,
        #[source]
        source: syn::Error,
    },
}

///
/// Digest
/// SHA-256 of an embedded artifact
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Digest([u8; 32]);

impl Digest {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Identifier-safe form of a platform name: ASCII letters and digits are
/// kept (lowercased), everything else becomes `_`.
#[must_use]
pub fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Module name of the engine file for `name`.
#[must_use]
pub fn module_name(name: &str) -> String {
    format!("{FILE_PREFIX}{}", file_stem(name))
}

/// File name of the engine file for `name`.
#[must_use]
pub fn file_name(name: &str) -> String {
    format!("{}.rs", module_name(name))
}

///
/// TESTS
///
