//! Resolve a file reference to a file on disk.

use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use pupil_core::entities::FileReference;

use crate::error::{DownloadError, StoreError};
use crate::store::BlobStore;

/// Fetch the blob behind `file` and write it to `dir/<name>`.
///
/// `data:` URLs carrying a `;base64` marker are decoded to raw bytes; any
/// other content is written verbatim. When `dir/<name>` already exists the
/// name gets a ` (n)` suffix before the extension. Returns the written path.
///
/// # Errors
///
/// Returns `DownloadError::MissingBlob` when the reference points at nothing,
/// `DownloadError::Decode` for malformed base64, and `DownloadError::Io` if
/// the file cannot be written.
pub async fn trigger_download<S: BlobStore>(
    store: &S,
    file: &FileReference,
    dir: &Path,
) -> Result<PathBuf, DownloadError> {
    let content = match store.get(&file.id).await {
        Ok(content) => content,
        Err(StoreError::BlobNotFound(_)) => {
            tracing::warn!(id = %file.id, name = %file.name, "download requested for missing blob");
            return Err(DownloadError::MissingBlob {
                id: file.id.clone(),
                name: file.name.clone(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let bytes = decode_content(&file.id, &content)?;
    tokio::fs::create_dir_all(dir).await?;
    let target = available_path(dir, &safe_file_name(&file.name, &file.id));
    tokio::fs::write(&target, &bytes).await?;
    tracing::info!(id = %file.id, path = %target.display(), bytes = bytes.len(), "file downloaded");
    Ok(target)
}

/// Decode `data:<mime>;base64,<payload>`; anything else passes through.
///
/// # Errors
///
/// Returns `DownloadError::Decode` if a base64 payload is malformed.
pub fn decode_content(id: &str, content: &str) -> Result<Vec<u8>, DownloadError> {
    let Some(rest) = content.strip_prefix("data:") else {
        return Ok(content.as_bytes().to_vec());
    };
    let Some((meta, payload)) = rest.split_once(',') else {
        return Ok(content.as_bytes().to_vec());
    };
    if !meta.split(';').any(|part| part.eq_ignore_ascii_case("base64")) {
        return Ok(content.as_bytes().to_vec());
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| DownloadError::Decode {
            id: id.to_string(),
            reason: e.to_string(),
        })
}

/// Keep only the final path component; fall back to the id when empty.
fn safe_file_name(name: &str, id: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        id.to_string()
    } else {
        base.to_string()
    }
}

/// First of `name`, `stem (1).ext`, `stem (2).ext`, … that does not exist.
fn available_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };
    (1u32..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        })
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}
