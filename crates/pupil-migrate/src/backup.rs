//! Full-backup export and import.
//!
//! A bundle carries the stored document as-is plus the content of every file
//! it references. Import writes the files first and the document last; the
//! next startup migrates whatever shape the document was in.

use std::collections::BTreeMap;
use std::path::Path;

use pupil_core::bundle::BackupBundle;
use pupil_core::entities::Document;
use pupil_core::responses::BackupResponse;
use pupil_store::{BlobStore, DocumentStore, StoreError};

use crate::error::MigrationError;
use crate::shape::collect_file_references;

/// Build a bundle from the stored document and its blobs.
///
/// Returns the bundle and the IDs of referenced files that have no blob.
///
/// # Errors
///
/// Returns `MigrationError::Store` if the store fails for any reason other
/// than a missing blob.
pub async fn export_bundle<S: BlobStore + DocumentStore>(
    store: &S,
    document_key: &str,
) -> Result<(BackupBundle, Vec<String>), MigrationError> {
    store.init().await?;
    let document = store
        .load(document_key)
        .await?
        .unwrap_or_else(Document::empty_value);

    let mut files = BTreeMap::new();
    let mut missing = Vec::new();
    for file in collect_file_references(&document) {
        match store.get(&file.id).await {
            Ok(content) => {
                files.insert(file.id, content);
            }
            Err(StoreError::BlobNotFound(id)) => {
                tracing::warn!(%id, name = %file.name, "referenced file missing; left out of backup");
                missing.push(id);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok((BackupBundle::full(document, files), missing))
}

/// Export a bundle to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Same as [`export_bundle`], plus `MigrationError::Io` if the file cannot
/// be written.
pub async fn export_to_path<S: BlobStore + DocumentStore>(
    store: &S,
    document_key: &str,
    path: &Path,
) -> Result<BackupResponse, MigrationError> {
    let (bundle, missing_files) = export_bundle(store, document_key).await?;
    let json = serde_json::to_string_pretty(&bundle)
        .map_err(|e| MigrationError::InvalidBundle(e.to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json).await?;
    tracing::info!(path = %path.display(), files = bundle.files.len(), "backup exported");
    Ok(BackupResponse {
        path: path.display().to_string(),
        files: bundle.files.len(),
        missing_files,
    })
}

/// Restore a bundle into the store. Returns the number of files written.
///
/// # Errors
///
/// Returns `MigrationError::InvalidBundle` if the bundle is not a full
/// backup, `MigrationError::MalformedDocument` if its document is not an
/// object, and `MigrationError::Store` if a write fails. The document is
/// only written after every file.
pub async fn import_bundle<S: BlobStore + DocumentStore>(
    store: &S,
    document_key: &str,
    bundle: &BackupBundle,
) -> Result<usize, MigrationError> {
    if !bundle.is_full_backup() {
        return Err(MigrationError::InvalidBundle(format!(
            "expected dataType 'fullBackup', found '{}'",
            bundle.data_type
        )));
    }
    if !bundle.app_data.is_object() {
        return Err(MigrationError::MalformedDocument(
            "backup appData is not an object".into(),
        ));
    }

    store.init().await?;
    for (id, content) in &bundle.files {
        store
            .put(id, content)
            .await
            .map_err(|source| MigrationError::BlobWrite {
                id: id.clone(),
                source,
            })?;
    }
    store.save(document_key, &bundle.app_data).await?;
    tracing::info!(files = bundle.files.len(), "backup imported");
    Ok(bundle.files.len())
}

/// Read a bundle from `path` and restore it.
///
/// # Errors
///
/// Same as [`import_bundle`], plus `MigrationError::Io` if the file cannot
/// be read and `MigrationError::InvalidBundle` if it does not parse.
pub async fn import_from_path<S: BlobStore + DocumentStore>(
    store: &S,
    document_key: &str,
    path: &Path,
) -> Result<BackupResponse, MigrationError> {
    let text = tokio::fs::read_to_string(path).await?;
    let bundle: BackupBundle =
        serde_json::from_str(&text).map_err(|e| MigrationError::InvalidBundle(e.to_string()))?;
    let files = import_bundle(store, document_key, &bundle).await?;
    Ok(BackupResponse {
        path: path.display().to_string(),
        files,
        missing_files: Vec::new(),
    })
}
