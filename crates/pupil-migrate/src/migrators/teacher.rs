//! Teacher profile migrator: collapse the legacy `teachers` list.

use pupil_core::errors::CoreError;
use serde_json::{Map, Value};

use super::Migrated;
use crate::context::MigrationContext;
use crate::registry::FieldMigrator;
use crate::shape::is_truthy;

/// Replace a legacy `teachers` list with a single `teacherProfile`.
///
/// Applies only when `teachers` is truthy and `teacherProfile` is absent.
/// The first entry's `name` and `email` become the profile; an empty list
/// yields `null`.
#[must_use]
pub fn migrate_teacher_profile(document: Value) -> Migrated<Value> {
    let Value::Object(mut root) = document else {
        return Migrated::unchanged(document);
    };
    let has_legacy = is_truthy(root.get("teachers"));
    if !has_legacy || root.contains_key("teacherProfile") {
        return Migrated::unchanged(Value::Object(root));
    }

    let teachers = root.remove("teachers");
    let profile = match teachers.as_ref().and_then(Value::as_array).and_then(|t| t.first()) {
        Some(Value::Object(first)) => {
            let mut profile = Map::new();
            for key in ["name", "email"] {
                let field = first
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| Value::String(String::new()));
                profile.insert(key.into(), field);
            }
            Value::Object(profile)
        }
        _ => Value::Null,
    };
    root.insert("teacherProfile".into(), profile);
    Migrated::new(Value::Object(root), true)
}

pub struct TeacherProfileMigrator;

impl FieldMigrator for TeacherProfileMigrator {
    fn name(&self) -> &'static str {
        "teacher_profile"
    }

    fn migrate(
        &self,
        document: Value,
        _ctx: &mut MigrationContext,
    ) -> Result<Migrated<Value>, CoreError> {
        Ok(migrate_teacher_profile(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn first_teacher_becomes_profile() {
        let doc = json!({
            "teachers": [
                {"id": "t1", "name": "Ada", "email": "ada@example.edu", "subjects": ["Maths"]},
                {"id": "t2", "name": "Bo", "email": "bo@example.edu"}
            ]
        });
        let out = migrate_teacher_profile(doc);
        assert!(out.changed);
        assert_eq!(
            out.value,
            json!({"teacherProfile": {"name": "Ada", "email": "ada@example.edu"}})
        );
    }

    #[test]
    fn empty_list_becomes_null_profile() {
        let out = migrate_teacher_profile(json!({"teachers": []}));
        assert!(out.changed);
        assert_eq!(out.value, json!({"teacherProfile": null}));
    }

    #[test]
    fn existing_profile_wins() {
        let doc = json!({"teachers": [{"name": "Old"}], "teacherProfile": null});
        let out = migrate_teacher_profile(doc.clone());
        assert!(!out.changed);
        assert_eq!(out.value, doc);
    }

    #[test]
    fn idempotent() {
        let once = migrate_teacher_profile(json!({"teachers": [{"name": "A", "email": "a@x"}]}));
        let twice = migrate_teacher_profile(once.value.clone());
        assert!(!twice.changed);
        assert_eq!(twice.value, once.value);
    }
}
