//! Fragment rendering.
//!
//! Every `*.tera` file under the template directory is a fragment. The
//! header fragment seeds the buffer; every other fragment whose file name
//! does not start with `_` is appended in path order behind a marker line.
//! Private fragments stay available to `import` and `include`.

pub mod format;
mod helpers;

use crate::Root;
use format::{format_source, marker};
use std::{
    error::Error as _,
    ffi::OsStr,
    path::{Path, PathBuf},
};
use tera::{Context, Tera};
use thiserror::Error as ThisError;
use tracing::debug;
use walkdir::WalkDir;

/// Fragment rendered first.
pub const HEADER_FRAGMENT: &str = "_header.rs.tera";

const PRIVATE_MARKER: char = '_';
const TEMPLATE_EXTENSION: &str = "tera";

///
/// RenderError
///

#[derive(Debug, ThisError)]
pub enum RenderError {
    #[error("walking template directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("loading templates from {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("template directory {0} has no {HEADER_FRAGMENT}")]
    MissingHeader(PathBuf),

    #[error("building render context: {0}")]
    Context(String),

    #[error("executing fragment '{fragment}': {message}")]
    Execute { fragment: String, message: String },

    #[error("fragment '{fragment}' produced invalid source: {source}\n{buffer}")]
    Syntax {
        fragment: String,
        #[source]
        source: syn::Error,
        buffer: String,
    },

    #[error("formatting rendered source: {0}")]
    Format(#[source] syn::Error),
}

///
/// TemplateSet
/// fragments discovered under one directory, ordered by relative path
///

#[derive(Clone, Debug)]
pub struct TemplateSet {
    dir: PathBuf,
    fragments: Vec<(String, PathBuf)>,
}

impl TemplateSet {
    pub fn discover(dir: &Path) -> Result<Self, RenderError> {
        let mut fragments = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|source| RenderError::Walk {
                path: dir.to_path_buf(),
                source,
            })?;

            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension() != Some(OsStr::new(TEMPLATE_EXTENSION))
            {
                continue;
            }

            let relative = path.strip_prefix(dir).unwrap_or(path);
            let name = relative
                .components()
                .map(|part| part.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            fragments.push((name, path.to_path_buf()));
        }

        // walkdir sorts per directory; sort again so nesting can't reorder
        fragments.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Self {
            dir: dir.to_path_buf(),
            fragments,
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All fragment names, private ones included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn has_header(&self) -> bool {
        self.names().any(|name| name == HEADER_FRAGMENT)
    }

    /// Fragments appended to the output, in order.
    pub fn emitting(&self) -> impl Iterator<Item = &str> {
        self.names().filter(|name| !is_private(name))
    }

    fn load(&self, root: &Root) -> Result<Tera, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        helpers::register(&mut tera, &root.ast);

        tera.add_template_files(
            self.fragments
                .iter()
                .map(|(name, path)| (path.as_path(), Some(name.as_str()))),
        )
        .map_err(|err| RenderError::Load {
            path: self.dir.clone(),
            message: error_chain(&err),
        })?;

        Ok(tera)
    }
}

/// Render the client source for `root` from the fragments in `template_dir`.
pub fn render(template_dir: &Path, root: &Root) -> Result<String, RenderError> {
    let set = TemplateSet::discover(template_dir)?;
    if !set.has_header() {
        return Err(RenderError::MissingHeader(template_dir.to_path_buf()));
    }

    let tera = set.load(root)?;
    let context =
        Context::from_serialize(root).map_err(|err| RenderError::Context(error_chain(&err)))?;

    let mut buffer = execute(&tera, HEADER_FRAGMENT, &context)?;
    check(&buffer, HEADER_FRAGMENT)?;

    for fragment in set.emitting() {
        let output = execute(&tera, fragment, &context)?;

        if !buffer.ends_with('\n') {
            buffer.push('\n');
        }
        buffer.push_str(&marker(fragment));
        buffer.push('\n');
        buffer.push_str(&output);

        check(&buffer, fragment)?;
        debug!(fragment, bytes = output.len(), "rendered fragment");
    }

    format_source(&buffer).map_err(RenderError::Format)
}

fn execute(tera: &Tera, fragment: &str, context: &Context) -> Result<String, RenderError> {
    tera.render(fragment, context)
        .map_err(|err| RenderError::Execute {
            fragment: fragment.to_string(),
            message: error_chain(&err),
        })
}

fn check(buffer: &str, fragment: &str) -> Result<(), RenderError> {
    syn::parse_file(buffer)
        .map(drop)
        .map_err(|source| RenderError::Syntax {
            fragment: fragment.to_string(),
            source,
            buffer: buffer.to_string(),
        })
}

fn is_private(name: &str) -> bool {
    name.rsplit('/')
        .next()
        .is_some_and(|file| file.starts_with(PRIVATE_MARKER))
}

// tera hides the useful part of a failure in its source chain
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }

    message
}

///
/// TESTS
///
