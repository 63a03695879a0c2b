use std::borrow::Cow;

use tracing::{debug, dispatcher, error, info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialise le logging :
/// - journald si présent (/run/systemd/journal/socket)
/// - sinon fallback sur stderr (fmt)
///
/// RUST_LOG prime sur `default_level`.
pub fn init_logging(default_level: &str) {
    if dispatcher::has_been_set() {
        return;
    }

    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(feature = "journald")]
    if std::path::Path::new("/run/systemd/journal/socket").exists() {
        if let Ok(layer) = tracing_journald::layer() {
            if tracing_subscriber::registry()
                .with(filter.clone())
                .with(layer)
                .try_init()
                .is_ok()
            {
                return;
            }
        }
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Évènements structurés de l'application.
#[derive(Debug, Clone)]
pub enum LogEvent<'a> {
    ConfigLoaded {
        source: Cow<'a, str>,
        port: u16,
        file_browser: bool,
    },
    HttpServerStarted {
        addr: Cow<'a, str>,
        cors_origins: usize,
    },
    HttpBindFailed {
        addr: Cow<'a, str>,
        error: Cow<'a, str>,
    },
    HttpServerShutdown {
        signal: Cow<'a, str>,
    },
    /// Source de découverte en échec (traitée comme vide).
    SourceUnavailable {
        source: &'static str,
        error: Cow<'a, str>,
    },
    DiscoveryCompleted {
        services: usize,
        processes: usize,
        duration_ms: u128,
    },
    RequestFailed {
        route: &'static str,
        error: Cow<'a, str>,
    },
}

impl LogEvent<'_> {
    pub fn emit(&self) {
        match self {
            LogEvent::ConfigLoaded {
                source,
                port,
                file_browser,
            } => info!(
                source = %source,
                port = *port,
                file_browser = *file_browser,
                "config_loaded"
            ),
            LogEvent::HttpServerStarted { addr, cors_origins } => info!(
                addr = %addr,
                cors_origins = *cors_origins,
                "http_server_started"
            ),
            LogEvent::HttpBindFailed { addr, error } => {
                error!(addr = %addr, error = %error, "http_bind_failed")
            }
            LogEvent::HttpServerShutdown { signal } => {
                info!(signal = %signal, "http_server_shutdown")
            }
            LogEvent::SourceUnavailable { source, error } => {
                warn!(source = *source, error = %error, "discovery_source_unavailable")
            }
            LogEvent::DiscoveryCompleted {
                services,
                processes,
                duration_ms,
            } => debug!(
                services = *services,
                processes = *processes,
                duration_ms = *duration_ms as u64,
                "discovery_completed"
            ),
            LogEvent::RequestFailed { route, error } => {
                warn!(route = *route, error = %error, "request_failed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_without_subscriber_is_harmless() {
        LogEvent::SourceUnavailable {
            source: "process_table",
            error: Cow::Borrowed("ps: not found"),
        }
        .emit();
        LogEvent::DiscoveryCompleted {
            services: 1,
            processes: 2,
            duration_ms: 3,
        }
        .emit();
    }
}
