use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Scalar
/// built-in leaf types a reference with `location = scalar` may name
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum Scalar {
    BigInt,
    Boolean,
    Bytes,
    DateTime,
    Decimal,
    Float,
    Int,
    Json,
    Null,
    String,
}

impl Scalar {
    /// Exact, case-sensitive lookup by DMMF type name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let scalar = match name {
            "BigInt" => Self::BigInt,
            "Boolean" => Self::Boolean,
            "Bytes" => Self::Bytes,
            "DateTime" => Self::DateTime,
            "Decimal" => Self::Decimal,
            "Float" => Self::Float,
            "Int" => Self::Int,
            "Json" => Self::Json,
            "Null" => Self::Null,
            "String" => Self::String,
            _ => return None,
        };

        Some(scalar)
    }

    /// Rust type the generated client uses for this scalar.
    #[must_use]
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::BigInt => "i64",
            Self::Boolean => "bool",
            Self::Bytes => "::qgen_client::types::Bytes",
            Self::DateTime => "::qgen_client::types::DateTime",
            Self::Decimal => "::qgen_client::types::Decimal",
            Self::Float => "f64",
            Self::Int => "i32",
            Self::Json => "::serde_json::Value",
            Self::Null => "()",
            Self::String => "String",
        }
    }
}

///
/// TESTS
///
