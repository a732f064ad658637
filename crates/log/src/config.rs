//! Configuration types

use serde::{Deserialize, Serialize};

/// Environment variable holding the filter directive.
pub const LEVEL_VAR: &str = "COURIER_LOG";
/// Environment variable selecting the output [`Format`].
pub const FORMAT_VAR: &str = "COURIER_LOG_FORMAT";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filter directive (e.g., "info", "debug,reqwest=warn")
    pub level: String,

    /// Output format
    pub format: Format,

    /// Show timestamps
    pub time: bool,

    /// Show target module
    pub target: bool,

    /// Use ANSI colors
    pub colors: bool,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable, multi-line
    Pretty,
    /// Compact single-line output
    #[default]
    Compact,
    /// Structured JSON output
    Json,
}

impl Format {
    /// Parses a format name, case-insensitively. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: Format::Compact,
            time: true,
            target: true,
            colors: std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

impl Config {
    /// Create configuration from environment variables.
    ///
    /// `COURIER_LOG` wins over `RUST_LOG`; `COURIER_LOG_FORMAT` picks the format.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::default().overlay(lookup)
    }

    /// Applies the logging variables found by `lookup` on top of `self`.
    #[must_use]
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = lookup(LEVEL_VAR).or_else(|| lookup("RUST_LOG")) {
            self.level = level;
        }
        if let Some(format) = lookup(FORMAT_VAR).as_deref().and_then(Format::parse) {
            self.format = format;
        }
        self
    }

    /// Plain compact output at `warn`, for command-line tools whose stdout is data.
    pub fn quiet() -> Self {
        Self {
            level: "warn".to_owned(),
            time: false,
            target: false,
            ..Self::default()
        }
    }

    /// Overrides the filter directive.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn courier_log_wins_over_rust_log() {
        let config = Config::from_lookup(lookup(&[("COURIER_LOG", "debug"), ("RUST_LOG", "trace")]));
        assert_eq!(config.level, "debug");

        let config = Config::from_lookup(lookup(&[("RUST_LOG", "trace")]));
        assert_eq!(config.level, "trace");
    }

    #[test]
    fn nothing_set_keeps_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.level, "info");
        assert_eq!(config.format, Format::Compact);
    }

    #[rstest]
    #[case("json", Some(Format::Json))]
    #[case(" Pretty ", Some(Format::Pretty))]
    #[case("COMPACT", Some(Format::Compact))]
    #[case("logfmt", None)]
    fn parses_format_names(#[case] input: &str, #[case] expected: Option<Format>) {
        assert_eq!(Format::parse(input), expected);
    }

    #[test]
    fn overlay_keeps_unset_values() {
        let base = Config::quiet().with_level("courier=debug");
        let config = base.overlay(lookup(&[("COURIER_LOG_FORMAT", "json")]));
        assert_eq!(config.level, "courier=debug");
        assert_eq!(config.format, Format::Json);
        assert!(!config.time);
    }

    #[test]
    fn unknown_format_env_is_ignored() {
        let config = Config::from_lookup(lookup(&[("COURIER_LOG_FORMAT", "xml")]));
        assert_eq!(config.format, Format::Compact);
    }

    #[test]
    fn deserializes_partial_table() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "level": "courier=debug",
            "format": "json"
        }))
        .unwrap();
        assert_eq!(config.level, "courier=debug");
        assert_eq!(config.format, Format::Json);
        assert!(config.time);
    }
}
