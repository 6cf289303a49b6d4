use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum BackupCommands {
    /// Write the stored document and every referenced file to a bundle.
    Export {
        /// Bundle path.
        path: String,
    },
    /// Restore a bundle. The next start migrates the restored document.
    Import {
        /// Bundle path.
        path: String,
    },
}
