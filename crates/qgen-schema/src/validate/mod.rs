//! Document well-formedness checks run before resolution.

pub mod model;
pub mod naming;

use crate::{error::ErrorTree, node::Document};

/// Run full document validation in a staged, deterministic order.
pub fn validate_document(document: &Document) -> Result<(), ErrorTree> {
    let mut errors = ErrorTree::new();

    // Phase 1: every name must identify exactly one declaration.
    naming::validate_unique_names(document, &mut errors);

    // Phase 2: per-model constraints that only need the model itself.
    for model in &document.datamodel.models {
        model::validate_model(model, &mut errors);
    }

    errors.result()
}
