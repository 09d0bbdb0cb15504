//! Subscriber bootstrap for binaries.
//!
//! Output format follows the [`Environment`] unless `LOG_FORMAT` overrides
//! it; `RUST_LOG` overrides the default directives.

use crate::{env_or_default, Environment};
use tracing_subscriber::{prelude::*, EnvFilter};

const DEV_DIRECTIVES: &str = "info,catalog_server=debug,domain_catalog=debug";
const PROD_DIRECTIVES: &str = "info,h2=warn,tower=warn";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Multi-line human readable output
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT=json|pretty`, falling back to JSON in production and pretty otherwise.
    pub fn resolve(environment: &Environment) -> Self {
        match env_or_default("LOG_FORMAT", "").to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ if environment.is_production() => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the color-eyre report hook. Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

fn default_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if environment.is_production() {
            PROD_DIRECTIVES
        } else {
            DEV_DIRECTIVES
        })
    })
}

/// Install the global subscriber with an `ErrorLayer`, so eyre reports carry
/// span traces.
///
/// Returns `false` when a subscriber was already installed (typical in tests).
pub fn init_tracing(environment: &Environment) -> bool {
    let format = LogFormat::resolve(environment);
    let registry = tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(default_filter(environment));

    let installed = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true),
            )
            .try_init()
            .is_ok(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_target(true))
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::info!(?environment, ?format, "tracing initialized");
    }
    installed
}
