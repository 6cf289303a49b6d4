use clap::{Args, Subcommand};

use crate::cli::subcommands::BackupCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the startup migration and print the report.
    Migrate,
    /// Show the document version, entity counts and blob count.
    Status,
    /// Write a stored file to disk.
    Download(DownloadArgs),
    /// Full backups.
    Backup {
        #[command(subcommand)]
        action: BackupCommands,
    },
    /// List registered JSON schemas or print one.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct DownloadArgs {
    /// File reference ID (`file-…`).
    pub file_id: String,

    /// File name to write. Defaults to the name recorded in the document.
    #[arg(long)]
    pub name: Option<String>,

    /// Target directory. Defaults to `general.download_dir`.
    #[arg(long)]
    pub out: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name. Lists every schema when omitted.
    pub name: Option<String>,
}
