use serde::{Deserialize, Serialize};

///
/// Enum
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enum {
    pub name: String,

    #[serde(default, deserialize_with = "values::deserialize")]
    pub values: Vec<EnumValue>,
}

impl Enum {
    #[must_use]
    pub fn has_value(&self, name: &str) -> bool {
        self.values.iter().any(|v| v.name == name)
    }
}

///
/// EnumValue
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
}

// Datamodel enums list values as objects, schema enum types as bare strings.
mod values {
    use super::EnumValue;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Name(String),
        Full(EnumValue),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<EnumValue>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<RawValue>::deserialize(deserializer)?;

        Ok(raw
            .into_iter()
            .map(|value| match value {
                RawValue::Name(name) => EnumValue {
                    name,
                    db_name: None,
                },
                RawValue::Full(value) => value,
            })
            .collect())
    }
}
