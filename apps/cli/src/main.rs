//! `courier`: list, describe, dispatch and package destination actions.

mod cli;
mod commands;
mod config;

use anyhow::Context;
use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    let _log = courier_log::init_with(config.log.clone().overlay(|key| std::env::var(key).ok()))
        .context("failed to initialize logging")?;

    commands::run(cli.command, &config).await
}
