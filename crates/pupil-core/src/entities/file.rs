use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lightweight pointer to content held in the blob store.
///
/// The blob behind an `id` is never rewritten once created.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct FileReference {
    pub id: String,
    pub name: String,
}

impl FileReference {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
