//! File rehydration: move inline file content out of the document.
//!
//! Runs in two phases. The structural walk is synchronous: it consumes the
//! tree, swaps every legacy inline file for a fresh `{id, name}` reference
//! and queues the content. The queued writes are then awaited one by one. If
//! any write fails the rewritten tree is dropped, so the caller never sees a
//! reference to a blob that was not stored.

use pupil_core::ids::PREFIX_FILE;
use pupil_store::BlobStore;
use serde_json::{Map, Value};

use crate::context::MigrationContext;
use crate::error::MigrationError;
use crate::shape::is_legacy_inline_object;

/// Result of a rehydration pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Rehydrated {
    pub value: Value,
    /// Number of inline files replaced by references.
    pub files: usize,
}

struct PendingBlob {
    id: String,
    content: String,
}

/// Rewrite every legacy inline file in `root` and store its content.
///
/// Content is written only when it is a non-empty string; the node is
/// replaced either way.
///
/// # Errors
///
/// Returns `MigrationError::BlobWrite` for the first failed write and
/// `MigrationError::Core` if an ID cannot be minted.
pub async fn rehydrate<B: BlobStore>(
    root: Value,
    store: &B,
    ctx: &mut MigrationContext,
) -> Result<Rehydrated, MigrationError> {
    let mut pending = Vec::new();
    let mut files = 0;
    let value = sever(root, ctx, &mut pending, &mut files)?;

    for blob in &pending {
        store
            .put(&blob.id, &blob.content)
            .await
            .map_err(|source| MigrationError::BlobWrite {
                id: blob.id.clone(),
                source,
            })?;
    }

    if files > 0 {
        tracing::info!(files, stored = pending.len(), "rehydrated inline files");
    }
    Ok(Rehydrated { value, files })
}

fn sever(
    node: Value,
    ctx: &mut MigrationContext,
    pending: &mut Vec<PendingBlob>,
    files: &mut usize,
) -> Result<Value, MigrationError> {
    match node {
        Value::Array(items) => items
            .into_iter()
            .map(|item| sever(item, ctx, pending, files))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(obj) if is_legacy_inline_object(&obj) => {
            replace_inline_file(obj, ctx, pending, files)
        }
        Value::Object(obj) => {
            let mut rewritten = Map::with_capacity(obj.len());
            for (key, child) in obj {
                rewritten.insert(key, sever(child, ctx, pending, files)?);
            }
            Ok(Value::Object(rewritten))
        }
        scalar => Ok(scalar),
    }
}

fn replace_inline_file(
    mut obj: Map<String, Value>,
    ctx: &mut MigrationContext,
    pending: &mut Vec<PendingBlob>,
    files: &mut usize,
) -> Result<Value, MigrationError> {
    let id = ctx.next_id(PREFIX_FILE)?;
    let name = obj.remove("name").unwrap_or(Value::Null);
    if let Some(Value::String(content)) = obj.remove("content") {
        if !content.is_empty() {
            pending.push(PendingBlob {
                id: id.clone(),
                content,
            });
        }
    }
    *files += 1;

    let mut reference = Map::new();
    reference.insert("id".into(), Value::String(id));
    reference.insert("name".into(), name);
    Ok(Value::Object(reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{collect_file_references, is_legacy_inline_file};
    use pretty_assertions::assert_eq;
    use pupil_core::ids::SequentialIds;
    use pupil_store::{MemoryStore, StoreError};
    use serde_json::json;

    fn ctx() -> MigrationContext {
        MigrationContext::new(SequentialIds::new(), "2024-06-01T00:00:00.000Z")
    }

    fn any_legacy(node: &Value) -> bool {
        if is_legacy_inline_file(node) {
            return true;
        }
        match node {
            Value::Array(items) => items.iter().any(any_legacy),
            Value::Object(obj) => obj.values().any(any_legacy),
            _ => false,
        }
    }

    #[tokio::test]
    async fn replaces_nested_inline_files_and_stores_content() {
        let store = MemoryStore::new();
        let input = json!({
            "students": [{
                "studentId": "s1",
                "workSamples": [{"id": "ws1", "fileUpload": {"name": "essay.docx", "content": "data:text/plain;base64,ZXNzYXk="}}],
                "wellbeing": {"deep": [[{"name": "plan.pdf", "content": "PLAN"}]]}
            }],
            "monitoringDocs": [{"scopeAndSequence": {"name": "sas.pdf", "content": "SAS"}}]
        });

        let out = rehydrate(input.clone(), &store, &mut ctx()).await.unwrap();

        assert_eq!(out.files, 3);
        assert!(!any_legacy(&out.value));
        let refs = collect_file_references(&out.value);
        assert_eq!(refs.len(), 3);
        for file in refs {
            let content = store.get(&file.id).await.unwrap();
            let original = match file.name.as_str() {
                "essay.docx" => "data:text/plain;base64,ZXNzYXk=",
                "plan.pdf" => "PLAN",
                "sas.pdf" => "SAS",
                other => panic!("unexpected file {other}"),
            };
            assert_eq!(content, original);
        }
        assert_eq!(
            out.value["students"][0]["workSamples"][0]["id"],
            json!("ws1")
        );
    }

    #[tokio::test]
    async fn node_with_id_is_left_alone() {
        let store = MemoryStore::new();
        let input = json!({"file": {"id": "file-x", "name": "a", "content": "keep"}});
        let out = rehydrate(input.clone(), &store, &mut ctx()).await.unwrap();
        assert_eq!(out.value, input);
        assert_eq!(out.files, 0);
        assert_eq!(store.blob_writes(), 0);
    }

    #[tokio::test]
    async fn empty_or_non_string_content_is_not_written() {
        let store = MemoryStore::new();
        let input = json!([
            {"name": "empty.txt", "content": ""},
            {"name": "odd.bin", "content": 42}
        ]);
        let out = rehydrate(input, &store, &mut ctx()).await.unwrap();
        assert_eq!(
            out.value,
            json!([
                {"id": "file-00000001", "name": "empty.txt"},
                {"id": "file-00000002", "name": "odd.bin"}
            ])
        );
        assert_eq!(out.files, 2);
        assert_eq!(store.blob_writes(), 0);
    }

    #[tokio::test]
    async fn failed_write_aborts_the_pass() {
        let store = MemoryStore::new();
        store.fail_blob_writes(true);
        let input = json!({"a": {"name": "x", "content": "y"}});
        let err = rehydrate(input, &store, &mut ctx()).await.unwrap_err();
        assert!(matches!(
            err,
            MigrationError::BlobWrite { ref id, source: StoreError::Query(_) } if id == "file-00000001"
        ));
    }

    #[tokio::test]
    async fn scalars_and_empty_trees_pass_through() {
        let store = MemoryStore::new();
        for input in [json!(null), json!(7), json!("s"), json!([]), json!({})] {
            let out = rehydrate(input.clone(), &store, &mut ctx()).await.unwrap();
            assert_eq!(out.value, input);
        }
    }
}
