use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pupil migrate`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let controller = ctx.start().await?;
    let report = controller.report();
    if report.upgraded() && !flags.quiet {
        eprintln!(
            "Stored data was upgraded to a new file format ({} file(s) moved to the file store). This is a one-time process.",
            report.files_rehydrated
        );
    }
    output(report, flags.format)
}
