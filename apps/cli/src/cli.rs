use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Validate, send and package Courier destination actions.
#[derive(Debug, Parser)]
#[command(name = "courier", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file. Defaults to `courier.toml` in the working directory.
    #[arg(long, short, global = true, env = "COURIER_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every destination and its actions.
    List,
    /// Print the JSON field manifest of a destination or one of its actions.
    Describe(DescribeArgs),
    /// Validate one event and send it through an action.
    Dispatch(DispatchArgs),
    /// Write a destination's manifest into the versioned dist directory.
    Package(PackageArgs),
}

#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// Destination slug, e.g. `facebook-conversions-api`.
    pub destination: String,
    /// Action key; the whole destination is described when omitted.
    pub action: Option<String>,
}

#[derive(Debug, Args)]
pub struct DispatchArgs {
    /// Destination slug.
    pub destination: String,
    /// Action key.
    pub action: String,
    /// JSON event file, or `-` for stdin.
    #[arg(long, short, value_name = "FILE")]
    pub event: PathBuf,
}

#[derive(Debug, Args)]
pub struct PackageArgs {
    /// Destination slug.
    pub destination: String,
    /// Root directory of the `.courier/dist` tree.
    #[arg(long, short, default_value = ".", value_name = "DIR")]
    pub out: PathBuf,
}
