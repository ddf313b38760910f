//! Subscriber setup. The filter sits behind a reload layer so the level
//! from the config file can take effect after the config has been loaded
//! (and its own warnings have been logged).

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};
use webbridge_config::schema::LogLevel;

const DEFAULT_DIRECTIVE: &str = "webbridge=info";

pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    /// Set when `--log-level` was given; the config level is then ignored.
    pinned: bool,
}

/// Install the global subscriber. `RUST_LOG` is always honored; `cli`
/// adds a directive on top of it.
pub fn init(cli: Option<&str>) -> LogHandle {
    let (filter, handle) = reload::Layer::new(build_filter(cli.unwrap_or(DEFAULT_DIRECTIVE)));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
    LogHandle {
        handle,
        pinned: cli.is_some(),
    }
}

impl LogHandle {
    /// Switch to the config file's level unless the CLI pinned one.
    pub fn apply_config_level(&self, level: LogLevel) {
        if self.pinned || level.directive() == DEFAULT_DIRECTIVE {
            return;
        }
        match self.handle.reload(build_filter(level.directive())) {
            Ok(()) => tracing::debug!(directive = level.directive(), "Log level from config"),
            Err(e) => tracing::warn!(error = %e, "Failed to apply config log level"),
        }
    }
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(parse_directive(directive))
}

/// Parse `raw`, falling back to the default directive when it is malformed.
fn parse_directive(raw: &str) -> Directive {
    raw.parse()
        .or_else(|_| DEFAULT_DIRECTIVE.parse())
        .unwrap_or_else(|_| Directive::from(LevelFilter::INFO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_directive_is_kept() {
        let directive = parse_directive("webbridge=debug").to_string().to_lowercase();
        assert_eq!(directive, "webbridge=debug");
    }

    #[test]
    fn malformed_directive_falls_back_to_default() {
        assert_eq!(
            parse_directive("webbridge=[[").to_string(),
            parse_directive(DEFAULT_DIRECTIVE).to_string()
        );
    }
}
