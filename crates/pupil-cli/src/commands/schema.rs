use anyhow::Context;
use pupil_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `pupil schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();
    match &args.name {
        None => output(&registry.list(), flags.format),
        Some(name) => {
            let schema = registry
                .get(name)
                .with_context(|| format!("unknown schema '{name}'; run 'pupil schema' to list them"))?;
            output(schema, flags.format)
        }
    }
}
