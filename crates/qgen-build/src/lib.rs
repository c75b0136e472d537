//! ## Crate layout
//! - `render`: ordered fragment rendering and source formatting.
//! - `root`: the single context value every template receives.
//! - `engine`: collaborators that locate engine binaries and name the host.
//! - `target`: binary-target resolution and engine module naming.
//! - `run`: the end-to-end generation pipeline.

mod engine;
mod render;
mod root;
mod run;
mod target;

pub use engine::{EngineError, EngineSource, HostPlatform, LocalCache, Platform, QUERY_ENGINE};
pub use render::{
    HEADER_FRAGMENT, RenderError, TemplateSet, format::format_source, format::marker, render,
};
pub use root::{EngineModule, Root};
pub use run::{EngineFile, GeneratorInput, Report, RunError, run, write_client, write_gitignore};
pub use target::{LINUX, NATIVE, engine_modules, resolve_targets};

/// Name of the generated client file inside the output directory.
pub const CLIENT_FILE_NAME: &str = "db_gen.rs";

/// Name of the ignore file written next to the client.
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Patterns written to the ignore file, one per line.
pub const GITIGNORE_CONTENT: &str = "db_gen.rs\nquery_engine_*\n";

/// Built-in template set shipped with this crate.
pub const DEFAULT_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");
