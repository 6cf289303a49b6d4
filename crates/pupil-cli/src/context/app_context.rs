use anyhow::Context;
use pupil_config::PupilConfig;
use pupil_migrate::{DocumentController, MigrationContext, Orchestrator};
use pupil_store::PupilDb;
use pupil_store::journal::JournalWriter;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub db: PupilDb,
    pub config: PupilConfig,
}

impl AppContext {
    /// Open the configured database.
    pub async fn init(config: PupilConfig) -> anyhow::Result<Self> {
        let db_path = config.storage.database_path();
        let db_path_str = db_path.to_string_lossy();
        let db = PupilDb::open_local(&db_path_str)
            .await
            .with_context(|| format!("failed to open database at {}", db_path.display()))?;
        tracing::debug!(path = %db_path.display(), "pupil store ready");
        Ok(Self { db, config })
    }

    pub fn document_key(&self) -> &str {
        &self.config.storage.document_key
    }

    /// Orchestrator configured from `migration.*`.
    pub fn orchestrator(&self) -> anyhow::Result<Orchestrator<'_, PupilDb>> {
        let journal = if self.config.migration.journal {
            let dir = self.config.storage.journal_dir();
            JournalWriter::new(dir.clone())
                .with_context(|| format!("failed to open journal at {}", dir.display()))?
        } else {
            JournalWriter::disabled()
        };
        Ok(Orchestrator::new(&self.db, self.document_key())
            .with_journal(journal)
            .strict_schema(self.config.migration.strict_schema))
    }

    /// Run the startup sequence and take ownership of the live document.
    pub async fn start(&self) -> anyhow::Result<DocumentController<'_, PupilDb>> {
        let mut migration = MigrationContext::live();
        DocumentController::start(self.orchestrator()?, &mut migration)
            .await
            .context("startup migration failed")
    }
}
