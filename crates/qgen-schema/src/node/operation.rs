use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// InputType
/// argument shape accepted by an operation (`UserWhereInput`, ...)
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputType {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<InputField>,
}

impl InputType {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&InputField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

///
/// InputField
///
/// An input field may accept several shapes (a scalar or a nested filter),
/// hence the list of candidate references.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputField {
    pub name: String,

    #[serde(default)]
    pub is_required: bool,

    #[serde(default)]
    pub is_nullable: bool,

    pub input_types: Vec<TypeRef>,
}

///
/// OutputType
/// result shape of an operation; `Query` and `Mutation` hold the root surface
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputType {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<OutputField>,
}

impl OutputType {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&OutputField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

///
/// OutputField
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputField {
    pub name: String,

    #[serde(default)]
    pub args: Vec<InputField>,

    pub output_type: TypeRef,

    #[serde(default)]
    pub is_nullable: bool,
}

///
/// TypeRef
/// a by-name reference into one of the document namespaces
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    #[serde(rename = "type")]
    pub type_name: String,

    pub location: Location,

    #[serde(default)]
    pub is_list: bool,
}

///
/// Location
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    #[display("scalar")]
    Scalar,
    #[display("inputObjectTypes")]
    InputObjectTypes,
    #[display("outputObjectTypes")]
    OutputObjectTypes,
    #[display("enumTypes")]
    EnumTypes,
}
