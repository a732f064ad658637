use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use courier_action::ActionRegistry;

use crate::cli::PackageArgs;

/// `<out>/.courier/dist/<slug>/<version>`
pub fn dist_dir(out: &Path, slug: &str, version: &str) -> PathBuf {
    out.join(".courier").join("dist").join(slug).join(version)
}

pub fn run(registry: &ActionRegistry, args: &PackageArgs) -> anyhow::Result<()> {
    let info = super::destination(registry, &args.destination)?;
    let manifest = registry
        .describe(&info.slug)
        .ok_or_else(|| anyhow!("destination `{}` has no actions", info.slug))?;

    let dir = dist_dir(&args.out, &info.slug, &info.version.to_string());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create `{}`", dir.display()))?;

    let path = dir.join("manifest.json");
    let json = serde_json::to_string_pretty(&manifest).context("failed to render manifest")?;
    std::fs::write(&path, json).with_context(|| format!("failed to write `{}`", path.display()))?;

    tracing::debug!(path = %path.display(), "manifest written");
    println!("{}", path.display());
    Ok(())
}
