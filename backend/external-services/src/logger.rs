//! Console logging setup.

use serde::Deserialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log config settings.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Log {
    /// Logging to a console.
    #[serde(default)]
    pub console: LogConsole,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LogConsole {
    /// Whether you want to see logs in your terminal.
    pub enabled: bool,
    /// Log format.
    #[serde(default)]
    pub log_format: LogFormat,
    /// Directive which sets the log level for one or more crates/modules.
    #[serde(default)]
    pub filtering_directive: Option<String>,
}

impl Default for LogConsole {
    fn default() -> Self {
        Self {
            enabled: true,
            log_format: LogFormat::default(),
            filtering_directive: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Default,
    /// Structured JSON output.
    Json,
}

/// Install the global subscriber. A second call is a no-op, so tests and
/// embedding applications can both invoke it safely.
pub fn setup(config: &Log) {
    if !config.console.enabled {
        return;
    }
    let filter = config
        .console
        .filtering_directive
        .as_deref()
        .map(EnvFilter::new)
        .unwrap_or_else(EnvFilter::from_default_env);

    match config.console.log_format {
        LogFormat::Default => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()
                .ok();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_logging_defaults_to_enabled_plain_output() {
        let config = Log::default();
        assert!(config.console.enabled);
        assert_eq!(config.console.log_format, LogFormat::Default);
    }

    #[test]
    fn log_format_deserializes_from_lowercase() {
        let config: Log = serde_json::from_str(
            r#"{"console": {"enabled": true, "log_format": "json"}}"#,
        )
        .expect("log config");
        assert_eq!(config.console.log_format, LogFormat::Json);
    }
}
