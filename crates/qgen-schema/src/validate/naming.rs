use crate::{err, error::ErrorTree, node::Document};
use std::collections::BTreeMap;

/// Reject duplicate declarations within each namespace.
///
/// Models and datamodel enums share one namespace. Schema enum types may
/// mirror a datamodel enum of the same name; that mirror is not a duplicate.
/// Output types are allowed to share a model's name, since the document
/// emits one output type per model.
pub fn validate_unique_names(document: &Document, errs: &mut ErrorTree) {
    let mut declared: BTreeMap<&str, &str> = BTreeMap::new();

    for model in &document.datamodel.models {
        declare(&mut declared, &model.name, "model", errs);
    }
    for e in &document.datamodel.enums {
        declare(&mut declared, &e.name, "enum", errs);
    }

    let mut enum_types = BTreeMap::new();
    for e in document.schema.enum_types.iter() {
        declare(&mut enum_types, &e.name, "enum type", errs);
    }

    let mut inputs = BTreeMap::new();
    for input in document.schema.input_object_types.iter() {
        declare(&mut inputs, &input.name, "input type", errs);
    }

    let mut outputs = BTreeMap::new();
    for output in document.schema.output_object_types.iter() {
        declare(&mut outputs, &output.name, "output type", errs);
    }
}

fn declare<'a>(
    seen: &mut BTreeMap<&'a str, &'static str>,
    name: &'a str,
    kind: &'static str,
    errs: &mut ErrorTree,
) {
    if name.is_empty() {
        err!(errs, "{kind} with an empty name");
        return;
    }

    if let Some(prev) = seen.insert(name, kind) {
        err!(errs, "duplicate name '{name}': declared as {prev} and as {kind}");
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn model_and_enum_sharing_a_name_is_rejected() {
        let doc = document(json!({
            "datamodel": {
                "models": [{ "name": "Role", "fields": [] }],
                "enums": [{ "name": "Role", "values": [{ "name": "ADMIN" }] }]
            }
        }));

        let mut errs = ErrorTree::new();
        validate_unique_names(&doc, &mut errs);

        assert_eq!(
            errs.messages(),
            ["duplicate name 'Role': declared as model and as enum"]
        );
    }

    #[test]
    fn output_type_mirroring_a_model_is_accepted() {
        let doc = document(json!({
            "datamodel": { "models": [{ "name": "User", "fields": [] }] },
            "schema": {
                "outputObjectTypes": { "prisma": [], "model": [{ "name": "User", "fields": [] }] },
                "enumTypes": { "model": [{ "name": "Role", "values": ["ADMIN"] }] }
            }
        }));

        let mut errs = ErrorTree::new();
        validate_unique_names(&doc, &mut errs);

        assert!(errs.is_empty(), "unexpected errors: {errs}");
    }

    #[test]
    fn duplicate_input_types_across_namespaces_are_rejected() {
        let doc = document(json!({
            "datamodel": {},
            "schema": {
                "inputObjectTypes": {
                    "prisma": [{ "name": "UserWhereInput", "fields": [] }],
                    "model": [{ "name": "UserWhereInput", "fields": [] }]
                }
            }
        }));

        let mut errs = ErrorTree::new();
        validate_unique_names(&doc, &mut errs);

        assert_eq!(errs.messages().len(), 1);
    }
}
