//! Ordered registry of field migration steps.

use pupil_core::errors::CoreError;
use serde_json::Value;

use crate::context::MigrationContext;
use crate::error::MigrationError;
use crate::migrators::{
    ClassesMigrator, Migrated, MonitoringDocsMigrator, StudentsMigrator, TeacherProfileMigrator,
};

/// One field migration step over the whole document.
///
/// A step only reads and writes its own subtree of the root, which is what
/// makes the registry order irrelevant to the final shape.
pub trait FieldMigrator: Send + Sync {
    /// Stable step name used in reports and the journal.
    fn name(&self) -> &'static str;

    /// Transform the document, reporting whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` only for failures outside the data itself, such as
    /// an exhausted ID source. Unexpected shapes are not errors.
    fn migrate(
        &self,
        document: Value,
        ctx: &mut MigrationContext,
    ) -> Result<Migrated<Value>, CoreError>;
}

/// The result of running every registered step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepsApplied {
    pub value: Value,
    /// Names of the steps that changed the document, in run order.
    pub changed_steps: Vec<String>,
}

impl StepsApplied {
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.changed_steps.is_empty()
    }
}

pub struct MigrationRegistry {
    steps: Vec<Box<dyn FieldMigrator>>,
}

impl MigrationRegistry {
    /// Monitoring docs, students, classes, then the teacher profile.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_steps(vec![
            Box::new(MonitoringDocsMigrator),
            Box::new(StudentsMigrator),
            Box::new(ClassesMigrator),
            Box::new(TeacherProfileMigrator),
        ])
    }

    #[must_use]
    pub fn from_steps(steps: Vec<Box<dyn FieldMigrator>>) -> Self {
        Self { steps }
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run every step in order, threading the document through.
    ///
    /// # Errors
    ///
    /// Returns `MigrationError::Migrator` naming the first step that fails.
    /// Later steps do not run.
    pub fn run(
        &self,
        document: Value,
        ctx: &mut MigrationContext,
    ) -> Result<StepsApplied, MigrationError> {
        let mut value = document;
        let mut changed_steps = Vec::new();
        for step in &self.steps {
            let result = step
                .migrate(value, ctx)
                .map_err(|source| MigrationError::Migrator {
                    name: step.name(),
                    source,
                })?;
            if result.changed {
                tracing::debug!(step = step.name(), "migration step changed the document");
                changed_steps.push(step.name().to_string());
            }
            value = result.value;
        }
        Ok(StepsApplied {
            value,
            changed_steps,
        })
    }
}

impl Default for MigrationRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
