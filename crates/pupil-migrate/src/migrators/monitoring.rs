//! Monitoring document migrator.
//!
//! Every field is repaired independently against the blank skeleton, so a
//! document with one legacy field keeps the rest of its data untouched.

use pupil_core::enums::Term;
use pupil_core::errors::CoreError;
use pupil_core::ids::PREFIX_CONCERN;
use serde_json::{Map, Value, json};

use super::{Migrated, migrate_collection};
use crate::context::MigrationContext;
use crate::registry::FieldMigrator;
use crate::shape::{is_falsy, is_missing, is_term_keyed, is_truthy};

/// Term-indexed fields holding a list per term.
const TERM_LIST_FIELDS: [&str; 4] = [
    "teachingPrograms",
    "studentsCausingConcern",
    "illnessMisadventure",
    "malpractice",
];

/// Term-indexed fields holding one value per term.
const TERM_VALUE_FIELDS: [&str; 5] = [
    "semesterReports",
    "marksAndRanks",
    "specificLearningNeeds",
    "teacherSignOff",
    "headTeacherSignOff",
];

/// Per-assessment file lists.
const ASSESSMENT_FIELDS: [&str; 4] = [
    "assessmentTask1",
    "assessmentTask2",
    "assessmentTask3",
    "prePostDiagnostic",
];

/// Single values that older documents stored per term.
const FLATTENED_FIELDS: [&str; 3] = ["certifySyllabus", "scopeAndSequence", "assessmentSchedule"];

const SCANNED_WORK_SAMPLES: &str = "scannedWorkSamples";
const SCAN_TASKS: [&str; 3] = ["task1", "task2", "task3"];
const SCAN_LEVELS: [&str; 3] = ["top", "middle", "low"];

fn per_term(value: &Value) -> Value {
    Value::Object(
        Term::ALL
            .iter()
            .map(|term| (term.key().to_string(), value.clone()))
            .collect(),
    )
}

/// Default for one term of a single-value term field.
fn term_default(field: &str) -> Value {
    match field {
        "specificLearningNeeds" => Value::Bool(false),
        "teacherSignOff" | "headTeacherSignOff" => json!({"teacherName": "", "date": null}),
        _ => Value::Null,
    }
}

fn flattened_default(field: &str) -> Value {
    if field == "certifySyllabus" {
        Value::Bool(false)
    } else {
        Value::Null
    }
}

fn blank_scans() -> Value {
    json!({"top": null, "middle": null, "low": null})
}

fn blank_scanned_work_samples() -> Value {
    Value::Object(
        SCAN_TASKS
            .iter()
            .map(|task| ((*task).to_string(), blank_scans()))
            .collect(),
    )
}

/// A monitoring document with every field at its blank value.
#[must_use]
pub fn blank_monitoring_doc(id: &str, class_id: &str, year: i32) -> Value {
    let mut doc = Map::new();
    doc.insert("id".into(), json!(id));
    doc.insert("classId".into(), json!(class_id));
    doc.insert("year".into(), json!(year));
    for field in FLATTENED_FIELDS {
        doc.insert(field.into(), flattened_default(field));
    }
    for field in ASSESSMENT_FIELDS {
        doc.insert(field.into(), json!([]));
    }
    for field in TERM_LIST_FIELDS {
        doc.insert(field.into(), per_term(&json!([])));
    }
    for field in TERM_VALUE_FIELDS {
        doc.insert(field.into(), per_term(&term_default(field)));
    }
    doc.insert(SCANNED_WORK_SAMPLES.into(), blank_scanned_work_samples());
    Value::Object(doc)
}

/// Migrate one monitoring document.
///
/// # Errors
///
/// Returns `CoreError::Entropy` if a concern entry ID cannot be minted.
pub fn migrate_monitoring_doc(
    doc: Value,
    ctx: &mut MigrationContext,
) -> Result<Migrated<Value>, CoreError> {
    let Value::Object(mut doc) = doc else {
        tracing::debug!("monitoring doc is not an object; left untouched");
        return Ok(Migrated::unchanged(doc));
    };
    let mut changed = false;

    for field in FLATTENED_FIELDS {
        changed |= collapse_term_keyed(&mut doc, field);
    }
    for field in ASSESSMENT_FIELDS {
        changed |= listify(&mut doc, field);
    }
    for field in TERM_LIST_FIELDS {
        changed |= normalize_term_lists(&mut doc, field, ctx)?;
    }
    for field in TERM_VALUE_FIELDS {
        changed |= fill_term_values(&mut doc, field);
    }
    changed |= migrate_scanned_work_samples(&mut doc);

    Ok(Migrated::new(Value::Object(doc), changed))
}

/// `{"1": v, ...}` becomes `v`; absent or `null` becomes the default.
fn collapse_term_keyed(doc: &mut Map<String, Value>, field: &str) -> bool {
    let default = flattened_default(field);
    let current = doc.get(field);
    let next = if current.is_some_and(is_term_keyed) {
        current
            .and_then(|v| v.get(Term::One.key()))
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or(default)
    } else if is_missing(current) && current != Some(&default) {
        default
    } else {
        return false;
    };
    doc.insert(field.into(), next);
    true
}

/// Arrays pass through; a truthy scalar is wrapped; anything falsy is `[]`.
fn listify(doc: &mut Map<String, Value>, field: &str) -> bool {
    if doc.get(field).is_some_and(Value::is_array) {
        return false;
    }
    let items = match doc.remove(field) {
        Some(value) if !is_falsy(&value) => vec![value],
        _ => Vec::new(),
    };
    doc.insert(field.into(), Value::Array(items));
    true
}

fn normalize_term_lists(
    doc: &mut Map<String, Value>,
    field: &str,
    ctx: &mut MigrationContext,
) -> Result<bool, CoreError> {
    if !is_truthy(doc.get(field)) {
        doc.insert(field.into(), per_term(&json!([])));
        return Ok(true);
    }
    let Some(Value::Object(terms)) = doc.get_mut(field) else {
        tracing::debug!(field, "term field is not an object; left untouched");
        return Ok(false);
    };

    let mut changed = false;
    for term in Term::ALL {
        let key = term.key();
        if terms.get(key).is_some_and(Value::is_array) {
            continue;
        }
        let items = match terms.remove(key) {
            Some(value) if !is_falsy(&value) => vec![wrap_term_item(field, value, ctx)?],
            _ => Vec::new(),
        };
        terms.insert(key.into(), Value::Array(items));
        changed = true;
    }
    Ok(changed)
}

/// A legacy single file becomes one list item. Concern lists wrap it in a
/// concern entry with no students attached.
fn wrap_term_item(
    field: &str,
    value: Value,
    ctx: &mut MigrationContext,
) -> Result<Value, CoreError> {
    if field == "studentsCausingConcern" {
        Ok(json!({
            "id": ctx.next_id(PREFIX_CONCERN)?,
            "file": value,
            "studentIds": [],
        }))
    } else {
        Ok(value)
    }
}

fn fill_term_values(doc: &mut Map<String, Value>, field: &str) -> bool {
    let default = term_default(field);
    if !is_truthy(doc.get(field)) {
        doc.insert(field.into(), per_term(&default));
        return true;
    }
    let Some(Value::Object(terms)) = doc.get_mut(field) else {
        tracing::debug!(field, "term field is not an object; left untouched");
        return false;
    };
    let mut changed = false;
    for term in Term::ALL {
        if !terms.contains_key(term.key()) {
            terms.insert(term.key().into(), default.clone());
            changed = true;
        }
    }
    changed
}

fn migrate_scanned_work_samples(doc: &mut Map<String, Value>) -> bool {
    if !is_truthy(doc.get(SCANNED_WORK_SAMPLES)) {
        doc.insert(SCANNED_WORK_SAMPLES.into(), blank_scanned_work_samples());
        return true;
    }
    let Some(Value::Object(samples)) = doc.get_mut(SCANNED_WORK_SAMPLES) else {
        tracing::debug!("scannedWorkSamples is not an object; left untouched");
        return false;
    };

    if !samples.contains_key("task1") {
        let mut task1 = Map::new();
        for level in SCAN_LEVELS {
            task1.insert(level.into(), samples.remove(level).unwrap_or(Value::Null));
        }
        samples.clear();
        samples.insert("task1".into(), Value::Object(task1));
        samples.insert("task2".into(), blank_scans());
        samples.insert("task3".into(), blank_scans());
        return true;
    }

    let mut changed = false;
    for task in SCAN_TASKS {
        if is_missing(samples.get(task)) {
            samples.insert(task.into(), blank_scans());
            changed = true;
        }
    }
    changed
}

pub struct MonitoringDocsMigrator;

impl FieldMigrator for MonitoringDocsMigrator {
    fn name(&self) -> &'static str {
        "monitoring_docs"
    }

    fn migrate(
        &self,
        document: Value,
        ctx: &mut MigrationContext,
    ) -> Result<Migrated<Value>, CoreError> {
        migrate_collection(document, "monitoringDocs", |doc| {
            migrate_monitoring_doc(doc, ctx)
        })
    }
}
