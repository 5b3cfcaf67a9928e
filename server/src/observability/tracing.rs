//! tracing-subscriber initialization.
//!
//! Development gets compact human-readable output with SQL statement logging;
//! production gets JSON lines. `RUST_LOG` overrides the default filter.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Default log filter for an environment.
#[must_use]
pub const fn default_filter(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => "socialhub_server=debug,tower_http=debug,sqlx=info",
        Environment::Test => "socialhub_server=debug,tower_http=info,sqlx=warn",
        Environment::Production => "socialhub_server=info,tower_http=info,sqlx=warn",
    }
}

/// Install the global tracing subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(environment: Environment) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if environment.is_production() {
        builder.json().with_current_span(false).try_init()
    } else {
        builder.compact().with_target(true).try_init()
    };

    installed.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filters_parse() {
        for env in [
            Environment::Development,
            Environment::Test,
            Environment::Production,
        ] {
            let directives = default_filter(env);
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
            assert!(directives.contains("socialhub_server="));
        }
    }

    #[test]
    fn test_sql_statements_logged_only_in_development() {
        assert!(default_filter(Environment::Development).contains("sqlx=info"));
        assert!(default_filter(Environment::Production).contains("sqlx=warn"));
    }
}
