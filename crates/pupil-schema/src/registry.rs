//! Central schema registry for all Pupil types.
//!
//! The `SchemaRegistry` builds JSON Schemas from pupil-core types at
//! construction time using [`schemars::schema_for!`] and provides validation
//! via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Name of the root document schema.
pub const DOCUMENT_SCHEMA: &str = "document";

/// Central store of all JSON Schemas in the Pupil system.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. Panics if `serde_json::to_value` fails (should be
/// infallible for valid `schemars` output).
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, serde_json::to_value(schema_for!($ty)).unwrap());
    };
}

impl SchemaRegistry {
    /// Build a new registry containing all entity, journal, bundle and
    /// response schemas from pupil-core.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on any `schemars`-generated
    /// schema, which `schemars` output never does.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Entity types (8) ---
        register!(schemas, DOCUMENT_SCHEMA, pupil_core::entities::Document);
        register!(schemas, "student", pupil_core::entities::Student);
        register!(schemas, "class", pupil_core::entities::ClassData);
        register!(schemas, "monitoring_doc", pupil_core::entities::MonitoringDoc);
        register!(schemas, "teacher", pupil_core::entities::Teacher);
        register!(schemas, "file_reference", pupil_core::entities::FileReference);
        register!(
            schemas,
            "evidence_log_entry",
            pupil_core::entities::EvidenceLogEntry
        );
        register!(
            schemas,
            "numeracy_evidence_entry",
            pupil_core::entities::NumeracyEvidenceEntry
        );

        // --- Journal + bundle (2) ---
        register!(schemas, "migration_record", pupil_core::journal::MigrationRecord);
        register!(schemas, "backup_bundle", pupil_core::bundle::BackupBundle);

        // --- CLI response types (4) ---
        register!(
            schemas,
            "migration_report",
            pupil_core::responses::MigrationReport
        );
        register!(
            schemas,
            "status_response",
            pupil_core::responses::StatusResponse
        );
        register!(
            schemas,
            "download_response",
            pupil_core::responses::DownloadResponse
        );
        register!(
            schemas,
            "backup_response",
            pupil_core::responses::BackupResponse
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate a whole migrated document.
    ///
    /// # Errors
    ///
    /// Same as [`Self::validate`] for the `document` schema.
    pub fn validate_document(&self, document: &serde_json::Value) -> Result<(), SchemaError> {
        self.validate(DOCUMENT_SCHEMA, document)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pupil_core::entities::{ClassData, Document, FileReference};
    use pupil_core::enums::RecordStatus;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    #[test]
    fn registry_has_expected_count() {
        // 8 entities + 2 journal/bundle + 4 responses = 14
        assert_eq!(registry().schema_count(), 14);
    }

    #[test]
    fn registry_list_is_sorted() {
        let names = registry().list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn get_nonexistent_schema() {
        assert!(registry().get("nonexistent").is_none());
    }

    #[test]
    fn validate_valid_class() {
        let class = ClassData {
            class_id: "c1".into(),
            class_name: "9C".into(),
            teacher: String::new(),
            student_ids: vec![],
            status: RecordStatus::Active,
            student_sort_order: None,
            seating_charts: None,
            active_seating_chart_name: None,
        };
        let json = serde_json::to_value(&class).unwrap();
        assert!(registry().validate("class", &json).is_ok());
    }

    #[test]
    fn validate_rejects_class_without_status() {
        let invalid = json!({"classId": "c1", "className": "9C", "studentIds": []});
        let result = registry().validate("class", &invalid);
        match result {
            Err(SchemaError::ValidationFailed { errors }) => assert!(!errors.is_empty()),
            other => panic!("Expected ValidationFailed, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_unknown_naplan_band() {
        let invalid = json!({
            "year7": {"reading": "Brilliant", "writing": "Strong", "spelling": "Strong", "grammar": "Strong", "numeracy": "Strong"},
            "year9": {"reading": "Strong", "writing": "Strong", "spelling": "Strong", "grammar": "Strong", "numeracy": "Strong"}
        });
        let student = json!({
            "studentId": "s1",
            "academic": {
                "naplan": invalid,
                "notes": [],
                "learningSupport": {"numeracyEvidence": [], "literacyEvidence": []}
            },
            "wellbeing": {"notes": []},
            "hpge": {"notes": []}
        });
        assert!(registry().validate("student", &student).is_err());
    }

    #[test]
    fn empty_document_is_valid() {
        let reg = registry();
        assert!(reg.validate_document(&Document::empty_value()).is_ok());
        let typed = serde_json::to_value(Document::default()).unwrap();
        assert!(reg.validate_document(&typed).is_ok());
    }

    #[test]
    fn legacy_inline_file_fails_file_reference_schema() {
        let legacy = json!({"name": "a.pdf", "content": "data:application/pdf;base64,AAAA"});
        assert!(registry().validate("file_reference", &legacy).is_err());
        let current = serde_json::to_value(FileReference::new("file-1", "a.pdf")).unwrap();
        assert!(registry().validate("file_reference", &current).is_ok());
    }

    #[test]
    fn validate_nonexistent_schema_returns_not_found() {
        let result = registry().validate("bogus", &json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }

    #[test]
    fn all_expected_schemas_present() {
        let reg = registry();
        for name in [
            "document",
            "student",
            "class",
            "monitoring_doc",
            "teacher",
            "file_reference",
            "evidence_log_entry",
            "numeracy_evidence_entry",
            "migration_record",
            "backup_bundle",
            "migration_report",
            "status_response",
            "download_response",
            "backup_response",
        ] {
            assert!(reg.get(name).is_some(), "Missing expected schema: {name}");
        }
    }
}
