//! Startup migration orchestrator.
//!
//! Two paths, chosen by the root `version` tag:
//! - absent or below [`CURRENT_VERSION`]: rehydrate inline files, run every
//!   field migrator, then persist with `version` set to the current version.
//! - current: run the field migrators and persist only when one of them
//!   changed something, keeping the stored version.
//!
//! Any error aborts before the document store is written.

use pupil_core::CURRENT_VERSION;
use pupil_core::entities::Document;
use pupil_core::journal::MigrationRecord;
use pupil_core::responses::{MigrationPath, MigrationReport};
use pupil_schema::{SchemaError, SchemaRegistry};
use pupil_store::journal::JournalWriter;
use pupil_store::{BlobStore, DocumentStore};
use serde_json::Value;

use crate::context::MigrationContext;
use crate::error::MigrationError;
use crate::registry::MigrationRegistry;
use crate::rehydrate::rehydrate;

/// The migrated live document and a description of how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    pub document: Value,
    pub report: MigrationReport,
}

pub struct Orchestrator<'a, S> {
    store: &'a S,
    document_key: String,
    registry: MigrationRegistry,
    schemas: SchemaRegistry,
    journal: JournalWriter,
    strict_schema: bool,
}

impl<'a, S: BlobStore + DocumentStore> Orchestrator<'a, S> {
    /// An orchestrator with the standard registry, no journal, and
    /// warn-only schema validation.
    pub fn new(store: &'a S, document_key: impl Into<String>) -> Self {
        Self {
            store,
            document_key: document_key.into(),
            registry: MigrationRegistry::standard(),
            schemas: SchemaRegistry::new(),
            journal: JournalWriter::disabled(),
            strict_schema: false,
        }
    }

    #[must_use]
    pub fn with_journal(mut self, journal: JournalWriter) -> Self {
        self.journal = journal;
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: MigrationRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Abort instead of warning when the migrated document fails validation.
    #[must_use]
    pub const fn strict_schema(mut self, strict: bool) -> Self {
        self.strict_schema = strict;
        self
    }

    #[must_use]
    pub const fn store(&self) -> &'a S {
        self.store
    }

    #[must_use]
    pub fn document_key(&self) -> &str {
        &self.document_key
    }

    /// Load, migrate and, when needed, persist the document.
    ///
    /// # Errors
    ///
    /// - `MigrationError::Store` if the store cannot be initialised, read, or
    ///   written.
    /// - `MigrationError::MalformedDocument` if the stored root is not an
    ///   object.
    /// - `MigrationError::BlobWrite` if an inline file cannot be stored.
    /// - `MigrationError::Migrator` if a field migrator fails.
    /// - `MigrationError::SchemaViolation` when strict validation is on and
    ///   the result does not validate.
    pub async fn run(&self, ctx: &mut MigrationContext) -> Result<MigrationOutcome, MigrationError> {
        self.store.init().await?;

        let raw = match self.store.load(&self.document_key).await? {
            Some(raw) => raw,
            None => {
                tracing::info!(key = %self.document_key, "no stored document; starting empty");
                Document::empty_value()
            }
        };
        if !raw.is_object() {
            return Err(MigrationError::MalformedDocument(format!(
                "document '{}' root is not an object",
                self.document_key
            )));
        }

        let from_version = stored_version(&raw);
        let needs_upgrade = from_version.is_none_or(|v| v < CURRENT_VERSION);

        let (document, files_rehydrated, changed_steps, path) = if needs_upgrade {
            tracing::info!(?from_version, "upgrading document file format");
            let rehydrated = rehydrate(raw, self.store, ctx).await?;
            let applied = self.registry.run(rehydrated.value, ctx)?;
            let mut document = applied.value;
            if let Value::Object(root) = &mut document {
                root.insert("version".into(), Value::from(CURRENT_VERSION));
            }
            (
                document,
                rehydrated.files,
                applied.changed_steps,
                MigrationPath::Upgrade,
            )
        } else {
            let applied = self.registry.run(raw, ctx)?;
            (applied.value, 0, applied.changed_steps, MigrationPath::Structural)
        };

        let schema_warnings = self.check_schema(&document)?;
        let persist = needs_upgrade || !changed_steps.is_empty();
        let to_version = if needs_upgrade {
            Some(CURRENT_VERSION)
        } else {
            from_version
        };

        if persist {
            self.store.save(&self.document_key, &document).await?;
            tracing::info!(
                %path,
                files_rehydrated,
                steps = ?changed_steps,
                "migrated document saved"
            );
            self.record(from_version, to_version, path, files_rehydrated, &changed_steps);
        } else {
            tracing::debug!("document already current; nothing to save");
        }

        Ok(MigrationOutcome {
            document,
            report: MigrationReport {
                from_version,
                to_version,
                path,
                files_rehydrated,
                changed_steps,
                persisted: persist,
                schema_warnings,
            },
        })
    }

    fn check_schema(&self, document: &Value) -> Result<Vec<String>, MigrationError> {
        match self.schemas.validate_document(document) {
            Ok(()) => Ok(Vec::new()),
            Err(SchemaError::ValidationFailed { errors }) if self.strict_schema => {
                Err(MigrationError::SchemaViolation { errors })
            }
            Err(SchemaError::ValidationFailed { errors }) => {
                for error in &errors {
                    tracing::warn!(%error, "migrated document does not match schema");
                }
                Ok(errors)
            }
            Err(other) => {
                tracing::warn!(error = %other, "schema validation unavailable");
                Ok(vec![other.to_string()])
            }
        }
    }

    /// Append a journal record. Failures are logged, not returned.
    fn record(
        &self,
        from_version: Option<u32>,
        to_version: Option<u32>,
        path: MigrationPath,
        files_rehydrated: usize,
        changed_steps: &[String],
    ) {
        let Some(to_version) = to_version else {
            return;
        };
        let record = MigrationRecord {
            v: 1,
            ts: crate::context::timestamp_now(),
            from_version,
            to_version,
            path,
            files_rehydrated,
            changed_steps: changed_steps.to_vec(),
        };
        if let Err(error) = self.journal.append(&record) {
            tracing::warn!(%error, "failed to append migration journal");
        }
    }
}

/// The root `version` as an integer. Numbers stored as floats are truncated;
/// non-numeric, negative or out-of-range values count as absent.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn stored_version(root: &Value) -> Option<u32> {
    let version = root.get("version")?;
    if let Some(v) = version.as_u64() {
        return u32::try_from(v).ok();
    }
    let v = version.as_f64()?;
    if !v.is_finite() || v < 0.0 || v >= f64::from(u32::MAX) {
        return None;
    }
    Some(v.trunc() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pupil_core::ids::SequentialIds;
    use pupil_store::MemoryStore;
    use serde_json::json;

    fn ctx() -> MigrationContext {
        MigrationContext::new(SequentialIds::new(), "2024-06-01T00:00:00.000Z")
    }

    #[test]
    fn stored_version_reads_integers_only() {
        assert_eq!(stored_version(&json!({"version": 2})), Some(2));
        assert_eq!(stored_version(&json!({"version": "2"})), None);
        assert_eq!(stored_version(&json!({})), None);
        assert_eq!(stored_version(&json!({"version": -1})), None);
    }

    #[test]
    fn stored_version_accepts_float_numbers() {
        assert_eq!(stored_version(&json!({"version": 3.0})), Some(3));
        assert_eq!(stored_version(&json!({"version": 2.5})), Some(2));
        assert_eq!(stored_version(&json!({"version": 1.0})), Some(1));
        assert_eq!(stored_version(&json!({"version": -2.0})), None);
    }

    #[tokio::test]
    async fn float_version_takes_structural_path() {
        let store = MemoryStore::with_document(
            "appData",
            json!({
                "version": 3.0,
                "students": [],
                "classes": [{"classId": "c1", "className": "8B", "teacher": "T", "studentIds": []}],
                "monitoringDocs": [],
                "teacherProfile": {"name": "T", "email": "t@example.edu", "avatar": {"name": "me.png", "content": "AAAA"}}
            }),
        );
        let outcome = Orchestrator::new(&store, "appData")
            .run(&mut ctx())
            .await
            .unwrap();

        assert_eq!(outcome.report.path, MigrationPath::Structural);
        assert_eq!(outcome.report.from_version, Some(3));
        assert_eq!(outcome.report.files_rehydrated, 0);
        assert_eq!(store.blob_writes(), 0);

        let stored = store.document("appData").unwrap();
        assert_eq!(stored["version"].as_f64(), Some(3.0));
        assert_eq!(stored["classes"][0]["status"], json!("Active"));
        assert_eq!(stored["teacherProfile"]["avatar"]["content"], json!("AAAA"));
    }

    #[tokio::test]
    async fn absent_document_becomes_empty_v2() {
        let store = MemoryStore::new();
        let outcome = Orchestrator::new(&store, "appData")
            .run(&mut ctx())
            .await
            .unwrap();
        assert_eq!(outcome.document["version"], json!(2));
        assert_eq!(outcome.document["students"], json!([]));
        assert!(outcome.report.upgraded());
        assert!(outcome.report.persisted);
        assert!(outcome.report.schema_warnings.is_empty());
        assert_eq!(store.document_writes(), 1);
    }

    #[tokio::test]
    async fn non_object_root_is_rejected() {
        let store = MemoryStore::with_document("appData", json!([1, 2]));
        let err = Orchestrator::new(&store, "appData")
            .run(&mut ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, MigrationError::MalformedDocument(_)));
        assert_eq!(store.document_writes(), 0);
    }

    #[tokio::test]
    async fn unavailable_store_fails_startup() {
        let store = MemoryStore::new();
        store.fail_init(true);
        let err = Orchestrator::new(&store, "appData")
            .run(&mut ctx())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MigrationError::Store(pupil_store::StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn strict_schema_aborts_before_save() {
        let store = MemoryStore::with_document(
            "appData",
            json!({"version": 2, "students": [], "classes": [{"classId": 5}], "monitoringDocs": [], "teacherProfile": null}),
        );
        let err = Orchestrator::new(&store, "appData")
            .strict_schema(true)
            .run(&mut ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, MigrationError::SchemaViolation { .. }));
        assert_eq!(store.document_writes(), 0);
    }

    #[tokio::test]
    async fn lenient_schema_reports_warnings() {
        let store = MemoryStore::with_document(
            "appData",
            json!({"version": 2, "students": [], "classes": [{"classId": 5, "status": "Active"}], "monitoringDocs": [], "teacherProfile": null}),
        );
        let outcome = Orchestrator::new(&store, "appData")
            .run(&mut ctx())
            .await
            .unwrap();
        assert!(!outcome.report.schema_warnings.is_empty());
        assert!(!outcome.report.persisted);
    }

    #[tokio::test]
    async fn journal_records_persisted_runs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let journal = JournalWriter::new(tmp.path().to_path_buf()).unwrap();
        let store = MemoryStore::new();
        Orchestrator::new(&store, "appData")
            .with_journal(journal)
            .run(&mut ctx())
            .await
            .unwrap();

        let records = JournalWriter::new(tmp.path().to_path_buf())
            .unwrap()
            .read_all()
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, MigrationPath::Upgrade);
        assert_eq!(records[0].from_version, None);
        assert_eq!(records[0].to_version, 2);
    }
}
