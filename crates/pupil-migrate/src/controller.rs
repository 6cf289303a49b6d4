//! Owner of the live document.
//!
//! The controller runs the orchestrator exactly once when started. Every
//! later change goes through [`DocumentController::save`], which writes the
//! document as given and never re-runs migration. It is a single writer;
//! sharing it across tasks needs an outer lock.

use pupil_core::entities::Document;
use pupil_core::errors::CoreError;
use pupil_core::responses::MigrationReport;
use pupil_store::{BlobStore, DocumentStore};
use serde_json::Value;

use crate::context::MigrationContext;
use crate::error::MigrationError;
use crate::orchestrator::{Orchestrator, stored_version};

pub struct DocumentController<'a, S> {
    orchestrator: Orchestrator<'a, S>,
    document: Value,
    report: MigrationReport,
}

impl<'a, S: BlobStore + DocumentStore> DocumentController<'a, S> {
    /// Load and migrate the stored document, then hold it as live state.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Orchestrator::run`]. No live document
    /// exists when startup fails.
    pub async fn start(
        orchestrator: Orchestrator<'a, S>,
        ctx: &mut MigrationContext,
    ) -> Result<Self, MigrationError> {
        let outcome = orchestrator.run(ctx).await?;
        if outcome.report.upgraded() {
            tracing::info!("stored data was upgraded to the current file format");
        }
        Ok(Self {
            orchestrator,
            document: outcome.document,
            report: outcome.report,
        })
    }

    /// The live, migrated document.
    #[must_use]
    pub const fn document(&self) -> &Value {
        &self.document
    }

    /// How the live document was produced at startup.
    #[must_use]
    pub const fn report(&self) -> &MigrationReport {
        &self.report
    }

    /// The store the live document is persisted to.
    #[must_use]
    pub const fn store(&self) -> &'a S {
        self.orchestrator.store()
    }

    /// The live document read as typed entities.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidEntity` if the live document does not match
    /// the current schema.
    pub fn typed(&self) -> Result<Document, CoreError> {
        Document::from_value(self.document.clone())
    }

    /// The version tag of the live document.
    #[must_use]
    pub fn version(&self) -> Option<u32> {
        stored_version(&self.document)
    }

    /// Persist `document` as the new live state without migrating it.
    ///
    /// The stored version never goes backwards: a document without a version,
    /// or with a lower one, is saved with the live version.
    ///
    /// # Errors
    ///
    /// Returns `MigrationError::MalformedDocument` if `document` is not an
    /// object and `MigrationError::Store` if the write fails. The live state
    /// is unchanged on error.
    pub async fn save(&mut self, mut document: Value) -> Result<(), MigrationError> {
        let incoming = stored_version(&document);
        let Value::Object(root) = &mut document else {
            return Err(MigrationError::MalformedDocument(
                "saved document root is not an object".into(),
            ));
        };
        if let Some(live) = self.version() {
            if incoming.is_none_or(|v| v < live) {
                root.insert("version".into(), Value::from(live));
            }
        }

        self.orchestrator
            .store()
            .save(self.orchestrator.document_key(), &document)
            .await?;
        tracing::debug!("live document saved");
        self.document = document;
        Ok(())
    }

    /// Persist a typed document as the new live state.
    ///
    /// # Errors
    ///
    /// Same as [`Self::save`], plus `MigrationError::Core` if serialization
    /// fails.
    pub async fn save_typed(&mut self, document: &Document) -> Result<(), MigrationError> {
        self.save(document.to_value()?).await
    }
}
