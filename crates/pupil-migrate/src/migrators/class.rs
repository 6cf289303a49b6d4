//! Class migrator: backfill the `status` field.

use pupil_core::enums::RecordStatus;
use pupil_core::errors::CoreError;
use serde_json::Value;

use super::{Migrated, migrate_collection};
use crate::context::MigrationContext;
use crate::registry::FieldMigrator;

/// Add `status: "Active"` to a class that has no `status` key.
#[must_use]
pub fn migrate_class(class: Value) -> Migrated<Value> {
    let Value::Object(mut class) = class else {
        tracing::debug!("class is not an object; left untouched");
        return Migrated::unchanged(class);
    };
    if class.contains_key("status") {
        return Migrated::unchanged(Value::Object(class));
    }
    class.insert(
        "status".into(),
        Value::String(RecordStatus::Active.as_str().into()),
    );
    Migrated::new(Value::Object(class), true)
}

pub struct ClassesMigrator;

impl FieldMigrator for ClassesMigrator {
    fn name(&self) -> &'static str {
        "classes"
    }

    fn migrate(
        &self,
        document: Value,
        _ctx: &mut MigrationContext,
    ) -> Result<Migrated<Value>, CoreError> {
        migrate_collection(document, "classes", |class| Ok(migrate_class(class)))
    }
}
