use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ClassData, MonitoringDoc, Student, Teacher};
use crate::errors::CoreError;

/// The root aggregate persisted under a single document key.
///
/// `version` is absent on documents written before the file store existed;
/// that absence is what routes them through the upgrade path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub classes: Vec<ClassData>,
    #[serde(default)]
    pub monitoring_docs: Vec<MonitoringDoc>,
    #[serde(default)]
    pub teacher_profile: Option<Teacher>,
}

impl Document {
    /// Read a typed document out of a migrated JSON value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidEntity` if the value does not match the
    /// current schema.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CoreError> {
        serde_json::from_value(value).map_err(|e| CoreError::InvalidEntity {
            entity: "document",
            reason: e.to_string(),
        })
    }

    /// Serialize back into the persisted JSON shape.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Other` if serialization fails.
    pub fn to_value(&self) -> Result<serde_json::Value, CoreError> {
        serde_json::to_value(self).map_err(|e| CoreError::Other(e.into()))
    }

    /// The blank document written on first start.
    #[must_use]
    pub fn empty_value() -> serde_json::Value {
        serde_json::json!({
            "students": [],
            "classes": [],
            "monitoringDocs": [],
            "teacherProfile": null,
        })
    }
}
