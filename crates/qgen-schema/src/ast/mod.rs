//! Resolved schema tree.
//!
//! The [`Ast`] is an arena: every model, enum, input and output type lives
//! in one `Vec` per kind and links between them are typed indices. Nothing
//! in the tree is mutated after [`transform`] returns.

mod transform;

pub use transform::transform;

use crate::node::{Enum, Field, FieldKind, InputField, Location, OutputField, PrimaryKey, Scalar};
use serde::Serialize;
use thiserror::Error as ThisError;

/// Name of the output type holding the root query surface.
pub const QUERY_TYPE: &str = "Query";

///
/// ResolveError
///
/// Raised for references the document cannot satisfy and for template
/// lookups of fields that do not exist. Both mean the schema and the code
/// asking for it disagree, so neither is meant to be recovered from.
///

#[derive(Debug, ThisError)]
pub enum ResolveError {
    #[error("unresolved reference to '{type_name}' ({location}) from {owner}.{field}")]
    Unresolved {
        owner: String,
        field: String,
        type_name: String,
        location: Location,
    },

    #[error(
        "unresolved reference to {namespace} '{type_name}' from {owner}.{field}",
        namespace = .kind.namespace()
    )]
    UnresolvedField {
        owner: String,
        field: String,
        type_name: String,
        kind: FieldKind,
    },

    #[error("no such key found: {0}")]
    NoSuchKey(String),
}

macro_rules! arena_id {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            #[must_use]
            pub const fn index(self) -> usize {
                self.0
            }
        }
    };
}

arena_id!(ModelId);
arena_id!(EnumId);
arena_id!(InputId);
arena_id!(OutputId);

///
/// Target
/// what a resolved link points at
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Target {
    Scalar(Scalar),
    Model(ModelId),
    Enum(EnumId),
    Input(InputId),
    Output(OutputId),
}

///
/// TypeLink
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeLink {
    pub target: Target,
    pub name: String,
    pub is_list: bool,
}

///
/// Resolved
/// a link followed back into the arena
///

#[derive(Clone, Copy, Debug)]
pub enum Resolved<'a> {
    Scalar(Scalar),
    Model(&'a ModelNode),
    Enum(&'a EnumNode),
    Input(&'a InputNode),
    Output(&'a OutputNode),
}

///
/// ModelNode
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelNode {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,

    pub fields: Vec<FieldNode>,
    pub unique_fields: Vec<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKey>,
}

impl ModelNode {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldNode> {
        self.fields.iter().find(|f| f.field.name == name)
    }
}

///
/// FieldNode
///

#[derive(Clone, Debug, Serialize)]
pub struct FieldNode {
    #[serde(flatten)]
    pub field: Field,
    pub link: TypeLink,
}

///
/// EnumNode
///

#[derive(Clone, Debug, Serialize)]
pub struct EnumNode {
    #[serde(flatten)]
    pub def: Enum,
}

///
/// InputNode
///

#[derive(Clone, Debug, Serialize)]
pub struct InputNode {
    pub name: String,
    pub fields: Vec<InputFieldNode>,
}

impl InputNode {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&InputFieldNode> {
        self.fields.iter().find(|f| f.field.name == name)
    }
}

///
/// InputFieldNode
/// one link per accepted input shape, in document order
///

#[derive(Clone, Debug, Serialize)]
pub struct InputFieldNode {
    #[serde(flatten)]
    pub field: InputField,
    pub links: Vec<TypeLink>,
}

///
/// OutputNode
///

#[derive(Clone, Debug, Serialize)]
pub struct OutputNode {
    pub name: String,
    pub fields: Vec<OutputFieldNode>,
}

impl OutputNode {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&OutputFieldNode> {
        self.fields.iter().find(|f| f.field.name == name)
    }
}

///
/// OutputFieldNode
///

#[derive(Clone, Debug, Serialize)]
pub struct OutputFieldNode {
    #[serde(flatten)]
    pub field: OutputField,
    pub link: TypeLink,

    #[serde(rename = "resolvedArgs")]
    pub args: Vec<InputFieldNode>,
}

///
/// Ast
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct Ast {
    pub models: Vec<ModelNode>,
    pub enums: Vec<EnumNode>,
    pub inputs: Vec<InputNode>,
    pub outputs: Vec<OutputNode>,
}

impl Ast {
    #[must_use]
    pub fn model(&self, id: ModelId) -> &ModelNode {
        &self.models[id.0]
    }

    #[must_use]
    pub fn enum_node(&self, id: EnumId) -> &EnumNode {
        &self.enums[id.0]
    }

    #[must_use]
    pub fn input(&self, id: InputId) -> &InputNode {
        &self.inputs[id.0]
    }

    #[must_use]
    pub fn output(&self, id: OutputId) -> &OutputNode {
        &self.outputs[id.0]
    }

    /// Follow a link back into the arena.
    #[must_use]
    pub fn resolve(&self, link: &TypeLink) -> Resolved<'_> {
        match link.target {
            Target::Scalar(scalar) => Resolved::Scalar(scalar),
            Target::Model(id) => Resolved::Model(self.model(id)),
            Target::Enum(id) => Resolved::Enum(self.enum_node(id)),
            Target::Input(id) => Resolved::Input(self.input(id)),
            Target::Output(id) => Resolved::Output(self.output(id)),
        }
    }

    #[must_use]
    pub fn find_model(&self, name: &str) -> Option<&ModelNode> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Look up a field of the root `Query` output type.
    pub fn query_field(&self, name: &str) -> Result<&OutputFieldNode, ResolveError> {
        self.outputs
            .iter()
            .filter(|output| output.name == QUERY_TYPE)
            .find_map(|output| output.field(name))
            .ok_or_else(|| ResolveError::NoSuchKey(name.to_string()))
    }

    /// Look up an input type by name.
    pub fn input_type(&self, name: &str) -> Result<&InputNode, ResolveError> {
        self.inputs
            .iter()
            .find(|input| input.name == name)
            .ok_or_else(|| ResolveError::NoSuchKey(name.to_string()))
    }
}
