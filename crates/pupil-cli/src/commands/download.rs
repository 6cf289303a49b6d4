use std::path::PathBuf;

use anyhow::Context;
use pupil_core::entities::FileReference;
use pupil_core::responses::DownloadResponse;
use pupil_migrate::shape::collect_file_references;
use pupil_store::{DownloadError, trigger_download};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DownloadArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pupil download`.
pub async fn handle(
    args: &DownloadArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let controller = ctx.start().await?;
    let recorded = collect_file_references(controller.document())
        .into_iter()
        .find(|f| f.id == args.file_id);
    if recorded.is_none() {
        tracing::warn!(id = %args.file_id, "file is not referenced by the document");
    }

    let name = args
        .name
        .clone()
        .or_else(|| recorded.map(|f| f.name))
        .unwrap_or_else(|| args.file_id.clone());
    let file = FileReference::new(args.file_id.clone(), name);
    let dir = args
        .out
        .as_ref()
        .map_or_else(|| ctx.config.general.resolved_download_dir(), PathBuf::from);

    let path = match trigger_download(&ctx.db, &file, &dir).await {
        Ok(path) => path,
        Err(error @ DownloadError::MissingBlob { .. }) => {
            anyhow::bail!("{error}; the rest of the document is unaffected")
        }
        Err(error) => return Err(error).context("download failed"),
    };
    let bytes = std::fs::metadata(&path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();

    let response = DownloadResponse {
        id: file.id,
        path: path.display().to_string(),
        bytes: usize::try_from(bytes).unwrap_or(usize::MAX),
    };
    output(&response, flags.format)
}
