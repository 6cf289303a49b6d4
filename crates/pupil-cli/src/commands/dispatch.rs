use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Migrate => commands::migrate::handle(ctx, flags).await,
        Commands::Status => commands::status::handle(ctx, flags).await,
        Commands::Download(args) => commands::download::handle(&args, ctx, flags).await,
        Commands::Backup { action } => commands::backup::handle(&action, ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
