//! Structural shape classifiers.
//!
//! Legacy nodes carry no version tag of their own, so every legacy shape is
//! recognised by its keys alone. All such predicates live here and nowhere
//! else. [`classify`] evaluates them top to bottom; the first match wins.
//!
//! The inline-file test assumes no current entity ever has both `name` and
//! `content` without an `id`. A future field with that shape would be
//! rewritten by rehydration.

use pupil_core::entities::FileReference;
use serde_json::{Map, Value};

/// The closed set of node shapes the migrators distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `{name, content}` without `id`: file content stored inline.
    LegacyInlineFile,
    /// `{id, name}` pointing into the blob store.
    FileReference,
    /// An object indexed by term (`"1"`..`"4"`).
    TermKeyed,
    Object,
    Array,
    Scalar,
}

#[must_use]
pub fn classify(node: &Value) -> Shape {
    if is_legacy_inline_file(node) {
        Shape::LegacyInlineFile
    } else if is_file_reference(node) {
        Shape::FileReference
    } else if is_term_keyed(node) {
        Shape::TermKeyed
    } else {
        match node {
            Value::Object(_) => Shape::Object,
            Value::Array(_) => Shape::Array,
            _ => Shape::Scalar,
        }
    }
}

/// Has `name` and `content` and lacks `id`. Values are not inspected.
#[must_use]
pub fn is_legacy_inline_file(node: &Value) -> bool {
    node.as_object().is_some_and(is_legacy_inline_object)
}

/// [`is_legacy_inline_file`] for an already-destructured object.
#[must_use]
pub fn is_legacy_inline_object(obj: &Map<String, Value>) -> bool {
    obj.contains_key("name") && obj.contains_key("content") && !obj.contains_key("id")
}

/// Has string `id` and `name` and no inline `content`.
#[must_use]
pub fn is_file_reference(node: &Value) -> bool {
    node.as_object().is_some_and(|obj| {
        obj.get("id").is_some_and(Value::is_string)
            && obj.get("name").is_some_and(Value::is_string)
            && !obj.contains_key("content")
    })
}

/// An object carrying a term-1 key, the marker of a per-term value.
#[must_use]
pub fn is_term_keyed(node: &Value) -> bool {
    node.as_object().is_some_and(|obj| obj.contains_key("1"))
}

/// `null`, `false`, `0`, and `""`. Objects and arrays are never falsy.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_falsy(node: &Value) -> bool {
    match node {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// An absent value counts as falsy.
#[must_use]
pub fn is_truthy(node: Option<&Value>) -> bool {
    node.is_some_and(|v| !is_falsy(v))
}

/// Absent or explicitly `null`.
#[must_use]
pub fn is_missing(node: Option<&Value>) -> bool {
    node.is_none_or(Value::is_null)
}

/// Every file reference reachable from `root`, in depth-first order,
/// without duplicates.
#[must_use]
pub fn collect_file_references(root: &Value) -> Vec<FileReference> {
    let mut found = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node {
            Value::Array(items) => stack.extend(items.iter().rev()),
            Value::Object(obj) => {
                if is_file_reference(node) {
                    let id = obj.get("id").and_then(Value::as_str).unwrap_or_default();
                    let name = obj.get("name").and_then(Value::as_str).unwrap_or_default();
                    if !found.iter().any(|f: &FileReference| f.id == id) {
                        found.push(FileReference::new(id, name));
                    }
                } else {
                    stack.extend(obj.values().rev());
                }
            }
            _ => {}
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"name": "a.pdf", "content": "data:..."}), true)]
    #[case(json!({"name": "a.pdf", "content": null}), true)]
    #[case(json!({"name": "a.pdf", "content": "x", "id": "file-1"}), false)]
    #[case(json!({"name": "a.pdf"}), false)]
    #[case(json!({"content": "x"}), false)]
    #[case(json!([{"name": "a", "content": "b"}]), false)]
    #[case(json!("a.pdf"), false)]
    fn legacy_inline_file(#[case] node: Value, #[case] expected: bool) {
        assert_eq!(is_legacy_inline_file(&node), expected);
    }

    #[rstest]
    #[case(json!({"id": "file-1", "name": "a.pdf"}), true)]
    #[case(json!({"id": "file-1", "name": "a.pdf", "content": "x"}), false)]
    #[case(json!({"id": 7, "name": "a.pdf"}), false)]
    #[case(json!({"id": "concern-1", "file": {}, "studentIds": []}), false)]
    #[case(json!(null), false)]
    fn file_reference(#[case] node: Value, #[case] expected: bool) {
        assert_eq!(is_file_reference(&node), expected);
    }

    #[rstest]
    #[case(json!({"1": [], "2": []}), true)]
    #[case(json!({"1": null}), true)]
    #[case(json!({"2": []}), false)]
    #[case(json!([[]]), false)]
    fn term_keyed(#[case] node: Value, #[case] expected: bool) {
        assert_eq!(is_term_keyed(&node), expected);
    }

    #[rstest]
    #[case(json!(null), true)]
    #[case(json!(false), true)]
    #[case(json!(0), true)]
    #[case(json!(0.0), true)]
    #[case(json!(""), true)]
    #[case(json!(true), false)]
    #[case(json!(3), false)]
    #[case(json!("x"), false)]
    #[case(json!([]), false)]
    #[case(json!({}), false)]
    fn falsy(#[case] node: Value, #[case] expected: bool) {
        assert_eq!(is_falsy(&node), expected);
        assert_eq!(is_truthy(Some(&node)), !expected);
    }

    #[test]
    fn absent_is_missing_and_not_truthy() {
        assert!(is_missing(None));
        assert!(is_missing(Some(&json!(null))));
        assert!(!is_missing(Some(&json!([]))));
        assert!(!is_truthy(None));
    }

    #[test]
    fn classify_is_ordered() {
        assert_eq!(
            classify(&json!({"name": "a", "content": "b", "1": []})),
            Shape::LegacyInlineFile
        );
        assert_eq!(classify(&json!({"id": "f", "name": "a"})), Shape::FileReference);
        assert_eq!(classify(&json!({"1": []})), Shape::TermKeyed);
        assert_eq!(classify(&json!({})), Shape::Object);
        assert_eq!(classify(&json!([])), Shape::Array);
        assert_eq!(classify(&json!(1)), Shape::Scalar);
    }

    #[test]
    fn collects_nested_references_once() {
        let doc = json!({
            "students": [{
                "workSamples": [{"fileUpload": {"id": "file-1", "name": "a.pdf"}}],
                "evidenceLog": [{"evidenceFile": {"id": "file-2", "name": "b.pdf"}}]
            }],
            "monitoringDocs": [{
                "scopeAndSequence": {"id": "file-1", "name": "a.pdf"},
                "studentsCausingConcern": {"1": [{"id": "concern-1", "file": {"id": "file-3", "name": "c.pdf"}, "studentIds": []}]}
            }]
        });
        let ids: Vec<String> = collect_file_references(&doc)
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids.len(), 3);
        for id in ["file-1", "file-2", "file-3"] {
            assert!(ids.iter().any(|i| i == id), "missing {id}");
        }
    }
}
