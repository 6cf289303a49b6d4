//! Student migrator.
//!
//! Rules, applied to each student independently:
//! - NAPLAN: both `year7` and `year9` exist; a missing `year7` is built from
//!   the flat `naplan*` fields when any are present. The flat fields are
//!   always removed.
//! - Evidence log entries without `tags` get `["NCCD"]` when they carry a
//!   truthy `adjustment_level`, otherwise `[]`.
//! - Obsolete `academic.learningSupportAdjustments`,
//!   `hpge.extendAdjustments` and top-level `cultural` are removed.
//! - `wellbeing.notes`, `academic.notes` and `hpge.notes` default to `[]`.
//! - `academic.learningSupport` defaults to an empty support record.
//! - Legacy `numeracyNotes` and a single-file `numeracyEvidence` become
//!   numeracy evidence entries.
//! - `numeracyEvidence` and `literacyEvidence` default to `[]`.

use pupil_core::enums::{EvidenceTag, NAPLAN_SUBJECTS, NaplanBand};
use pupil_core::errors::CoreError;
use pupil_core::ids::PREFIX_NUMERACY_EVIDENCE;
use serde_json::{Map, Value, json};

use super::{Migrated, default_list, ensure_object, migrate_collection, strip};
use crate::context::MigrationContext;
use crate::registry::FieldMigrator;
use crate::shape::{is_falsy, is_missing, is_truthy};

/// Flat pre-`naplan` fields on `academic`, paired with their subject.
const FLAT_NAPLAN_FIELDS: [(&str, &str); 5] = [
    ("naplanReading", "reading"),
    ("naplanWriting", "writing"),
    ("naplanSpelling", "spelling"),
    ("naplanGrammar", "grammar"),
    ("naplanNumeracy", "numeracy"),
];

/// Migrate one student record.
///
/// # Errors
///
/// Returns `CoreError::Entropy` if a numeracy evidence ID cannot be minted.
pub fn migrate_student(
    student: Value,
    ctx: &mut MigrationContext,
) -> Result<Migrated<Value>, CoreError> {
    let Value::Object(mut student) = student else {
        tracing::debug!("student is not an object; left untouched");
        return Ok(Migrated::unchanged(student));
    };
    let mut changed = false;

    strip(&mut student, "cultural", &mut changed);
    backfill_evidence_tags(&mut student, &mut changed);

    if let Some(academic) = ensure_object(&mut student, "academic", &mut changed) {
        strip(academic, "learningSupportAdjustments", &mut changed);
        migrate_naplan(academic, &mut changed);
        default_list(academic, "notes", &mut changed);
        migrate_learning_support(academic, ctx, &mut changed)?;
    }

    if let Some(wellbeing) = ensure_object(&mut student, "wellbeing", &mut changed) {
        default_list(wellbeing, "notes", &mut changed);
    }

    if let Some(hpge) = ensure_object(&mut student, "hpge", &mut changed) {
        strip(hpge, "extendAdjustments", &mut changed);
        default_list(hpge, "notes", &mut changed);
    }

    Ok(Migrated::new(Value::Object(student), changed))
}

fn blank_naplan_set() -> Value {
    let band = Value::String(NaplanBand::NotAssessed.as_str().into());
    Value::Object(
        NAPLAN_SUBJECTS
            .iter()
            .map(|subject| ((*subject).to_string(), band.clone()))
            .collect(),
    )
}

fn migrate_naplan(academic: &mut Map<String, Value>, changed: &mut bool) {
    if academic
        .get("naplan")
        .is_some_and(|naplan| !naplan.is_null() && !naplan.is_object())
    {
        tracing::debug!("naplan is not an object; left untouched");
        return;
    }

    let mut flat = Map::new();
    for (field, subject) in FLAT_NAPLAN_FIELDS {
        if let Some(value) = academic.remove(field) {
            flat.insert(subject.to_string(), value);
            *changed = true;
        }
    }

    let Some(naplan) = ensure_object(academic, "naplan", changed) else {
        return;
    };

    if is_missing(naplan.get("year7")) {
        let year7 = if flat.is_empty() {
            blank_naplan_set()
        } else {
            synthesize_from_flat(&flat)
        };
        naplan.insert("year7".into(), year7);
        *changed = true;
    }
    if is_missing(naplan.get("year9")) {
        naplan.insert("year9".into(), blank_naplan_set());
        *changed = true;
    }
}

fn synthesize_from_flat(flat: &Map<String, Value>) -> Value {
    let mut set = Map::new();
    for subject in NAPLAN_SUBJECTS {
        let band = flat
            .get(subject)
            .filter(|v| !is_falsy(v))
            .cloned()
            .unwrap_or_else(|| Value::String(NaplanBand::NotAssessed.as_str().into()));
        set.insert(subject.to_string(), band);
    }
    Value::Object(set)
}

fn backfill_evidence_tags(student: &mut Map<String, Value>, changed: &mut bool) {
    let Some(Value::Array(entries)) = student.get_mut("evidenceLog") else {
        return;
    };
    for entry in entries {
        let Value::Object(entry) = entry else {
            continue;
        };
        if !is_missing(entry.get("tags")) {
            continue;
        }
        let tags = if is_truthy(entry.get("adjustment_level")) {
            json!([EvidenceTag::Nccd.as_str()])
        } else {
            json!([])
        };
        entry.insert("tags".into(), tags);
        *changed = true;
    }
}

fn default_learning_support() -> Value {
    json!({
        "isSwan": false,
        "requiresLearningCentreBooking": false,
        "differentiation": [],
        "numeracyEvidence": [],
        "literacyEvidence": [],
    })
}

fn migrate_learning_support(
    academic: &mut Map<String, Value>,
    ctx: &mut MigrationContext,
    changed: &mut bool,
) -> Result<(), CoreError> {
    if is_missing(academic.get("learningSupport")) {
        academic.insert("learningSupport".into(), default_learning_support());
        *changed = true;
    }
    let Some(Value::Object(support)) = academic.get_mut("learningSupport") else {
        tracing::debug!("learningSupport is not an object; left untouched");
        return Ok(());
    };

    convert_numeracy_evidence(support, ctx, changed)?;
    default_list(support, "numeracyEvidence", changed);
    default_list(support, "literacyEvidence", changed);
    Ok(())
}

fn convert_numeracy_evidence(
    support: &mut Map<String, Value>,
    ctx: &mut MigrationContext,
    changed: &mut bool,
) -> Result<(), CoreError> {
    let single_file = support
        .get("numeracyEvidence")
        .is_some_and(|v| !v.is_array());
    if !support.contains_key("numeracyNotes") && !single_file {
        return Ok(());
    }

    let mut entries = Vec::new();
    if let Some(Value::Array(notes)) = support.remove("numeracyNotes") {
        for note in notes {
            let Value::Object(note) = note else {
                tracing::debug!("numeracy note is not an object; dropped from conversion");
                continue;
            };
            let mut entry = numeracy_entry(ctx.next_id(PREFIX_NUMERACY_EVIDENCE)?);
            // `date` is required on evidence entries; dateless notes keep an empty one.
            entry.insert(
                "date".into(),
                note.get("date")
                    .cloned()
                    .unwrap_or_else(|| Value::String(String::new())),
            );
            if let Some(content) = note.get("content").filter(|c| !c.is_null()) {
                entry.insert("note".into(), content.clone());
            }
            entries.push(Value::Object(entry));
        }
    }

    if single_file {
        if let Some(file) = support.remove("numeracyEvidence").filter(|f| !is_falsy(f)) {
            let mut entry = numeracy_entry(ctx.next_id(PREFIX_NUMERACY_EVIDENCE)?);
            entry.insert("date".into(), Value::String(ctx.now().to_string()));
            entry.insert("file".into(), file);
            entries.push(Value::Object(entry));
        }
    }

    support.insert("numeracyEvidence".into(), Value::Array(entries));
    *changed = true;
    Ok(())
}

fn numeracy_entry(id: String) -> Map<String, Value> {
    let mut entry = Map::new();
    entry.insert("id".into(), Value::String(id));
    entry.insert("numeracyTags".into(), json!([]));
    entry.insert("newmansTags".into(), json!([]));
    entry
}

pub struct StudentsMigrator;

impl FieldMigrator for StudentsMigrator {
    fn name(&self) -> &'static str {
        "students"
    }

    fn migrate(
        &self,
        document: Value,
        ctx: &mut MigrationContext,
    ) -> Result<Migrated<Value>, CoreError> {
        migrate_collection(document, "students", |student| migrate_student(student, ctx))
    }
}
