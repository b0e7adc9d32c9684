//! Subscriber setup for the demo binary.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the level filter, e.g.
/// `CMDLINE_LOG=cmdline_parser=trace`.
pub const LOG_ENV: &str = "CMDLINE_LOG";

/// Logging settings, built once in `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            ansi: std::io::stderr().is_terminal(),
        }
    }
}

impl LogConfig {
    /// The filter to install: `CMDLINE_LOG` when set and valid, the
    /// configured level otherwise.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

/// Installs a stderr `fmt` subscriber. Does nothing if one is already set.
pub fn init(config: &LogConfig) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_target(false)
        .with_env_filter(config.env_filter())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(LogConfig::default().level, "warn");
    }

    #[test]
    fn test_filter_falls_back_to_level() {
        let config = LogConfig {
            level: "debug".to_string(),
            ansi: false,
        };
        if std::env::var_os(LOG_ENV).is_none() {
            assert_eq!(config.env_filter().max_level_hint(), Some(LevelFilter::DEBUG));
        }
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LogConfig {
            level: "off".to_string(),
            ansi: false,
        };
        init(&config);
        init(&config);
    }
}
