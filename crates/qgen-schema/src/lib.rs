//! ## Crate layout
//! - `node`: the flat schema-metadata document (DMMF) as deserialized.
//! - `validate`: document well-formedness checks run before resolution.
//! - `ast`: the resolved, cross-referenced tree every template renders from.
//! - `error`: route-free error aggregation shared by the validators.

pub mod ast;
pub mod error;
pub mod node;
pub mod validate;

use crate::{ast::ResolveError, error::ErrorTree};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        ast::{Ast, ResolveError, Target, TypeLink},
        err,
        error::ErrorTree,
        node::*,
    };
    pub use serde::{Deserialize, Serialize};
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("could not parse schema document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("schema validation failed: {0}")]
    Validation(ErrorTree),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Parse a DMMF document from JSON and check it is well-formed.
pub fn load(json: &str) -> Result<node::Document, Error> {
    let document: node::Document = serde_json::from_str(json)?;
    validate::validate_document(&document).map_err(Error::Validation)?;

    Ok(document)
}

/// Validate a document and resolve it into an [`ast::Ast`].
pub fn build(document: &node::Document) -> Result<ast::Ast, Error> {
    validate::validate_document(document).map_err(Error::Validation)?;
    let ast = ast::transform(document)?;

    Ok(ast)
}
