use std::io::Read;
use std::path::Path;

use anyhow::Context;
use courier_action::ActionRegistry;
use courier_http::ReqwestClient;
use serde_json::Value;

use crate::cli::DispatchArgs;
use crate::config::CliConfig;

fn read_event(path: &Path) -> anyhow::Result<Value> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read event from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event file `{}`", path.display()))?
    };
    serde_json::from_str(&text).context("event is not valid JSON")
}

pub async fn run(
    registry: &ActionRegistry,
    config: &CliConfig,
    args: &DispatchArgs,
) -> anyhow::Result<()> {
    let event = read_event(&args.event)?;
    let settings = config.settings_for(&args.destination);
    let client = ReqwestClient::with_config(&config.http)?;

    tracing::info!(destination = %args.destination, action = %args.action, "dispatching event");
    let response = registry
        .dispatch(&args.destination, &args.action, &event, &settings, &client)
        .await
        .with_context(|| format!("{}/{} failed", args.destination, args.action))?;

    println!("{}", response.status());
    let body = response.text();
    if !body.is_empty() {
        println!("{body}");
    }
    Ok(())
}
