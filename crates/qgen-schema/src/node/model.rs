use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Not;

///
/// Model
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,

    pub fields: Vec<Field>,

    /// Compound unique constraints, each an ordered list of field names.
    #[serde(default)]
    pub unique_fields: Vec<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKey>,
}

impl Model {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

///
/// PrimaryKey
/// compound primary key (single-field ids are flagged on the field itself)
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKey {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub fields: Vec<String>,
}

///
/// Field
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,

    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub is_required: bool,

    #[serde(default)]
    pub is_list: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_id: bool,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub is_unique: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldDefault>,
}

impl Field {
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        !self.is_required
    }

    #[must_use]
    pub const fn is_relation(&self) -> bool {
        matches!(self.kind, FieldKind::Object)
    }
}

///
/// FieldKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[display("scalar")]
    Scalar,
    #[display("enum")]
    Enum,
    #[display("object")]
    Object,
}

impl FieldKind {
    /// Namespace a field of this kind is resolved in.
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Enum => "enum",
            Self::Object => "model",
        }
    }
}

///
/// FieldDefault
///
/// Either a database-side generator such as `cuid()` or `now()`, or a
/// literal value written in the schema.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldDefault {
    Function {
        name: String,
        #[serde(default)]
        args: Vec<Value>,
    },
    Literal(Value),
}
