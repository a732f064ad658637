//! Layered configuration: defaults, then `courier.toml`, then `COURIER_*`
//! environment variables (`__` separates nesting levels).

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use courier_http::ClientConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default configuration file, resolved against the working directory.
pub const DEFAULT_FILE: &str = "courier.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "COURIER_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub log: courier_log::Config,
    pub http: ClientConfig,
    /// Destination settings keyed by destination slug.
    pub settings: BTreeMap<String, Value>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log: courier_log::Config::quiet(),
            http: ClientConfig::default(),
            settings: BTreeMap::new(),
        }
    }
}

impl CliConfig {
    /// Settings for `destination`, or an empty object.
    pub fn settings_for(&self, destination: &str) -> Value {
        self.settings
            .get(destination)
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    }
}

fn figment(file: &Path) -> Figment {
    Figment::from(Serialized::defaults(CliConfig::default()))
        .merge(Toml::file(file))
        .merge(
            // Handled by courier-log and clap respectively.
            Env::prefixed(ENV_PREFIX)
                .ignore(&["log", "log_format", "config"])
                .split("__"),
        )
}

/// Loads the configuration. An explicit `path` must exist; the default file
/// is optional.
pub fn load(path: Option<&Path>) -> anyhow::Result<CliConfig> {
    let file = match path {
        Some(path) if !path.is_file() => {
            bail!("configuration file `{}` does not exist", path.display())
        }
        Some(path) => path,
        None => Path::new(DEFAULT_FILE),
    };

    figment(file)
        .extract()
        .with_context(|| format!("failed to load configuration (file `{}`)", file.display()))
}
