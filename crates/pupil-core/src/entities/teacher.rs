use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The single teacher profile owning this document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Teacher {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}
