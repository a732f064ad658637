use anyhow::{Context, anyhow};
use courier_action::ActionRegistry;

use crate::cli::DescribeArgs;

pub fn run(registry: &ActionRegistry, args: &DescribeArgs) -> anyhow::Result<()> {
    let slug = &super::destination(registry, &args.destination)?.slug;

    let manifest = match &args.action {
        Some(action) => registry
            .describe_action(slug, action)
            .ok_or_else(|| anyhow!("unknown action `{action}` for destination `{slug}`"))?,
        None => registry
            .describe(slug)
            .ok_or_else(|| anyhow!("destination `{slug}` has no actions"))?,
    };

    let out = serde_json::to_string_pretty(&manifest).context("failed to render manifest")?;
    println!("{out}");
    Ok(())
}
