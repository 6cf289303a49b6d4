use std::path::Path;

use anyhow::Context;
use pupil_migrate::backup::{export_to_path, import_from_path};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BackupCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pupil backup`.
pub async fn handle(
    action: &BackupCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = match action {
        BackupCommands::Export { path } => export_to_path(&ctx.db, ctx.document_key(), Path::new(path))
            .await
            .with_context(|| format!("failed to export backup to {path}"))?,
        BackupCommands::Import { path } => import_from_path(&ctx.db, ctx.document_key(), Path::new(path))
            .await
            .with_context(|| format!("failed to import backup from {path}"))?,
    };
    if !response.missing_files.is_empty() && !flags.quiet {
        eprintln!(
            "{} referenced file(s) were missing from the file store and were left out",
            response.missing_files.len()
        );
    }
    output(&response, flags.format)
}
