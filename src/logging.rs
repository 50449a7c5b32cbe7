//! Tracing subscriber setup
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and HTTP request traces are logged at debug.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter directives used when `RUST_LOG` is unset
pub fn default_directives(config: &LoggingConfig) -> String {
    format!("fitlog={},tower_http=debug", config.level)
}

/// Install the global subscriber (pretty or JSON output)
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: "json".to_string(),
        };
        assert_eq!(default_directives(&config), "fitlog=debug,tower_http=debug");
    }
}
