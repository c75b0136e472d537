//! The flat schema-metadata document.
//!
//! These types mirror the DMMF JSON shape one-to-one. Type references are
//! plain strings here; resolving them into links is the job of
//! [`crate::ast::transform`].

mod r#enum;
mod model;
mod operation;
mod scalar;

pub use model::*;
pub use operation::*;
pub use r#enum::*;
pub use scalar::*;

use serde::{Deserialize, Serialize};

///
/// Document
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub datamodel: Datamodel,

    #[serde(default)]
    pub schema: SchemaTypes,
}

///
/// Datamodel
/// user-declared models and enums
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Datamodel {
    #[serde(default)]
    pub models: Vec<Model>,

    #[serde(default)]
    pub enums: Vec<Enum>,
}

impl Datamodel {
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }
}

///
/// SchemaTypes
/// the query surface derived from the datamodel
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaTypes {
    #[serde(default)]
    pub input_object_types: TypeGroup<InputType>,

    #[serde(default)]
    pub output_object_types: TypeGroup<OutputType>,

    #[serde(default)]
    pub enum_types: TypeGroup<Enum>,
}

///
/// TypeGroup
///
/// Schema types come split into the `prisma` namespace (operation plumbing)
/// and the `model` namespace (one entry per model). Lookups search both,
/// `prisma` first.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TypeGroup<T> {
    #[serde(default = "Vec::new")]
    pub prisma: Vec<T>,

    #[serde(default = "Vec::new")]
    pub model: Vec<T>,
}

impl<T> TypeGroup<T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.prisma.iter().chain(self.model.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prisma.len() + self.model.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prisma.is_empty() && self.model.is_empty()
    }
}

impl<T> Default for TypeGroup<T> {
    fn default() -> Self {
        Self {
            prisma: Vec::new(),
            model: Vec::new(),
        }
    }
}
