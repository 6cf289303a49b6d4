//! Per-entity field migrators.
//!
//! Each migrator takes one entity in whatever shape it was persisted and
//! returns the current shape plus a changed flag. They are synchronous and
//! idempotent: a second run over their own output reports no change. A node
//! of an unexpected type where an object is expected is left as it is and
//! does not count as a change.

pub mod class;
pub mod monitoring;
pub mod student;
pub mod teacher;

use pupil_core::errors::CoreError;
use serde_json::{Map, Value};

pub use class::{ClassesMigrator, migrate_class};
pub use monitoring::{MonitoringDocsMigrator, blank_monitoring_doc, migrate_monitoring_doc};
pub use student::{StudentsMigrator, migrate_student};
pub use teacher::{TeacherProfileMigrator, migrate_teacher_profile};

/// A migrated value and whether migration altered it.
#[derive(Debug, Clone, PartialEq)]
pub struct Migrated<T> {
    pub value: T,
    pub changed: bool,
}

impl<T> Migrated<T> {
    pub const fn new(value: T, changed: bool) -> Self {
        Self { value, changed }
    }

    pub const fn unchanged(value: T) -> Self {
        Self::new(value, false)
    }
}

/// Run `migrate` over every element of the array at `root[key]`.
///
/// A root that is not an object, or a missing or non-array collection, is
/// returned unchanged.
pub(crate) fn migrate_collection<F>(
    document: Value,
    key: &str,
    mut migrate: F,
) -> Result<Migrated<Value>, CoreError>
where
    F: FnMut(Value) -> Result<Migrated<Value>, CoreError>,
{
    let Value::Object(mut root) = document else {
        return Ok(Migrated::unchanged(document));
    };
    if !root.get(key).is_some_and(Value::is_array) {
        if root.contains_key(key) {
            tracing::debug!(key, "collection is not an array; left untouched");
        }
        return Ok(Migrated::unchanged(Value::Object(root)));
    }
    let Some(Value::Array(items)) = root.remove(key) else {
        return Ok(Migrated::unchanged(Value::Object(root)));
    };

    let mut changed = false;
    let mut migrated = Vec::with_capacity(items.len());
    for item in items {
        let result = migrate(item)?;
        changed |= result.changed;
        migrated.push(result.value);
    }
    root.insert(key.to_string(), Value::Array(migrated));
    Ok(Migrated::new(Value::Object(root), changed))
}

/// The object at `map[key]`, created empty when absent or `null`.
///
/// Returns `None` (and leaves the node alone) when the key holds something
/// other than an object.
pub(crate) fn ensure_object<'a>(
    map: &'a mut Map<String, Value>,
    key: &str,
    changed: &mut bool,
) -> Option<&'a mut Map<String, Value>> {
    if map.get(key).is_none_or(Value::is_null) {
        map.insert(key.to_string(), Value::Object(Map::new()));
        *changed = true;
    }
    match map.get_mut(key) {
        Some(Value::Object(obj)) => Some(obj),
        _ => {
            tracing::debug!(key, "expected an object; left untouched");
            None
        }
    }
}

/// Set `map[key]` to `[]` when absent or `null`.
pub(crate) fn default_list(map: &mut Map<String, Value>, key: &str, changed: &mut bool) {
    if map.get(key).is_none_or(Value::is_null) {
        map.insert(key.to_string(), Value::Array(Vec::new()));
        *changed = true;
    }
}

/// Remove `key` if present.
pub(crate) fn strip(map: &mut Map<String, Value>, key: &str, changed: &mut bool) {
    if map.remove(key).is_some() {
        *changed = true;
    }
}
