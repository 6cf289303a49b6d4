use anyhow::Context;
use pupil_core::responses::StatusResponse;
use pupil_migrate::DocumentController;
use pupil_store::{BlobStore, DocumentStore};
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pupil status`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let controller = ctx.start().await?;
    let response = summarize(&controller).await?;
    output(&response, flags.format)
}

/// Summarize the live document without requiring it to match the typed
/// schema, so documents kept with schema warnings still report.
pub async fn summarize<S: BlobStore + DocumentStore>(
    controller: &DocumentController<'_, S>,
) -> anyhow::Result<StatusResponse> {
    let document = controller.document();
    let blobs = controller
        .store()
        .count()
        .await
        .context("failed to count stored files")?;

    Ok(StatusResponse {
        version: controller.version(),
        students: list_len(document, "students"),
        classes: list_len(document, "classes"),
        monitoring_docs: list_len(document, "monitoringDocs"),
        teacher: document
            .pointer("/teacherProfile/name")
            .and_then(Value::as_str)
            .map(str::to_string),
        blobs,
    })
}

fn list_len(document: &Value, key: &str) -> usize {
    document.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}
