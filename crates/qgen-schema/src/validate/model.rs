use crate::{err, error::ErrorTree, node::Model};
use std::collections::BTreeSet;

/// Check field names are unique and every constraint names existing fields.
pub fn validate_model(model: &Model, errs: &mut ErrorTree) {
    let mut names = BTreeSet::new();
    for field in &model.fields {
        if !names.insert(field.name.as_str()) {
            err!(errs, "model '{}' declares field '{}' twice", model.name, field.name);
        }
    }

    for group in &model.unique_fields {
        if group.is_empty() {
            err!(errs, "model '{}' has an empty unique constraint", model.name);
        }
        for name in group {
            if model.field(name).is_none() {
                err!(
                    errs,
                    "unique constraint on model '{}' names unknown field '{name}'",
                    model.name
                );
            }
        }
    }

    if let Some(pk) = &model.primary_key {
        for name in &pk.fields {
            if model.field(name).is_none() {
                err!(
                    errs,
                    "primary key on model '{}' names unknown field '{name}'",
                    model.name
                );
            }
        }
    }
}

///
/// TESTS
///
