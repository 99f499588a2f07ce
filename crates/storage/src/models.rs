use serde::{Deserialize, Deserializer, Serialize};

pub type ClassId = u32;

/// Reference text for one Nice class, as exported from the classification XML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    #[serde(deserialize_with = "class_id_from_int_or_str")]
    pub class_id: ClassId,
    pub heading: Vec<String>,
    pub introduction: String,
    #[serde(rename = "include")]
    pub includes: Vec<String>,
    #[serde(rename = "exclude")]
    pub excludes: Vec<String>,
}

// Older exports wrote the class number as a string.
fn class_id_from_int_or_str<'de, D>(deserializer: D) -> Result<ClassId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(ClassId),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(n) => Ok(n),
        Raw::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid class_id {s:?}"))),
    }
}
