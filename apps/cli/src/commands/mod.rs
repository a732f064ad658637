mod describe;
mod dispatch;
mod list;
mod package;

use anyhow::{Context, anyhow};
use courier_action::{ActionRegistry, DestinationInfo};

use crate::cli::Command;
use crate::config::CliConfig;

pub async fn run(command: Command, config: &CliConfig) -> anyhow::Result<()> {
    let registry = courier_destinations::registry().context("failed to build destination registry")?;

    match command {
        Command::List => list::run(&registry),
        Command::Describe(args) => describe::run(&registry, &args),
        Command::Dispatch(args) => dispatch::run(&registry, config, &args).await,
        Command::Package(args) => package::run(&registry, &args),
    }
}

fn destination<'a>(registry: &'a ActionRegistry, slug: &str) -> anyhow::Result<&'a DestinationInfo> {
    registry.destination(slug).ok_or_else(|| {
        let known: Vec<&str> = registry.destinations().map(|d| d.slug.as_str()).collect();
        anyhow!("unknown destination `{slug}` (known: {})", known.join(", "))
    })
}
