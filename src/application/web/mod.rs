//! Module web : API JSON du tableau de bord.
//!
//! Endpoints :
//!   GET /api/health    -> état de l'API
//!   GET /api/system    -> CPU, mémoire, disque, réseau
//!   GET /api/services  -> services/processus du catalogue en cours d'exécution
//!   GET /api/files     -> listing d'un répertoire (si `enable_file_browser`)
//!   GET /api/network   -> totaux réseau et connexions actives
//!
//! Usage (ex. depuis un binaire) :
//!   let cfg = homeserver::ApiConfig::default();
//!   let engine = homeserver::ServiceDiscoveryEngine::native(
//!       homeserver::ServiceRegistry::from_config(&cfg),
//!   );
//!   homeserver::serve_http(cfg, engine).await?;

mod cors;

use std::{borrow::Cow, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::discovery::ServiceDiscoveryEngine;
use crate::application::files::list_directory;
use crate::application::logging::LogEvent;
use crate::application::system::{network_status, system_info, unix_timestamp};
use crate::domain::{ApiConfig, HomeserverError};

use cors::{cors_layer, CorsPolicy};

#[cfg(unix)]
use std::future::pending;
#[cfg(unix)]
use tokio::signal::unix::{signal as unix_signal, SignalKind};

const SERVICE_NAME: &str = "homeserver-api";
const SERVICES_TIMEOUT_DEFAULT: Duration = Duration::from_secs(10);

type AxumRequest = axum::extract::Request;

#[derive(Clone)]
struct AppState {
    engine: ServiceDiscoveryEngine,
    services_timeout: Duration,
    file_browser_root: Arc<str>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
    service: &'static str,
}

#[derive(Debug, Default, Deserialize)]
struct FilesQuery {
    path: Option<String>,
}

fn duration_from_secs_or_default(value: u64, default: Duration) -> Duration {
    if value == 0 {
        default
    } else {
        Duration::from_secs(value)
    }
}

fn router(config: &ApiConfig, engine: ServiceDiscoveryEngine) -> Router {
    let state = AppState {
        engine,
        services_timeout: duration_from_secs_or_default(
            config.services_timeout_secs,
            SERVICES_TIMEOUT_DEFAULT,
        ),
        file_browser_root: Arc::from(config.file_browser_root.as_str()),
    };
    let cors = Arc::new(CorsPolicy::new(&config.cors_origins));

    let mut app = Router::new()
        .route("/api/health", get(health))
        .route("/api/system", get(system))
        .route("/api/services", get(services))
        .route("/api/network", get(network));
    if config.enable_file_browser {
        app = app.route("/api/files", get(files));
    }

    app.layer(middleware::from_fn_with_state(cors, cors_layer))
        .with_state(state)
}

pub async fn serve_http(
    config: ApiConfig,
    engine: ServiceDiscoveryEngine,
) -> Result<(), HomeserverError> {
    let bind_addr = SocketAddr::new(config.bind, config.port);
    let app = router(&config, engine);

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(l) => l,
        Err(err) => {
            LogEvent::HttpBindFailed {
                addr: Cow::Owned(bind_addr.to_string()),
                error: Cow::Owned(err.to_string()),
            }
            .emit();
            return Err(map_io(err));
        }
    };
    let bind_addr = listener.local_addr().unwrap_or(bind_addr);
    LogEvent::HttpServerStarted {
        addr: Cow::Owned(bind_addr.to_string()),
        cors_origins: config.cors_origins.len(),
    }
    .emit();

    let shutdown = async {
        let signal = wait_for_shutdown_signal().await;
        LogEvent::HttpServerShutdown {
            signal: Cow::Borrowed(signal),
        }
        .emit();
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(map_io)?;

    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() -> &'static str {
    let mut sigterm = unix_signal(SignalKind::terminate()).ok();
    let mut sighup = unix_signal(SignalKind::hangup()).ok();

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            match res {
                Ok(()) => "ctrl_c",
                Err(err) => {
                    warn!(error = ?err, "ctrl_c_wait_failed");
                    "ctrl_c_error"
                }
            }
        }
        _ = async {
            if let Some(signal) = sigterm.as_mut() {
                signal.recv().await;
            } else {
                pending::<()>().await;
            }
        } => "sigterm",
        _ = async {
            if let Some(signal) = sighup.as_mut() {
                signal.recv().await;
            } else {
                pending::<()>().await;
            }
        } => "sighup",
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() -> &'static str {
    match tokio::signal::ctrl_c().await {
        Ok(()) => "ctrl_c",
        Err(err) => {
            warn!(error = ?err, "ctrl_c_wait_failed");
            "ctrl_c_error"
        }
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: unix_timestamp(),
        service: SERVICE_NAME,
    })
}

async fn system() -> Response {
    match tokio::task::spawn_blocking(system_info).await {
        Ok(Ok(info)) => Json(info).into_response(),
        Ok(Err(err)) => failure("/api/system", StatusCode::INTERNAL_SERVER_ERROR, err),
        Err(err) => failure("/api/system", StatusCode::INTERNAL_SERVER_ERROR, err),
    }
}

/// La découverte est bloquante : exécutée sur le pool dédié et bornée dans le temps.
async fn services(State(state): State<AppState>) -> Response {
    let engine = state.engine.clone();
    let task = tokio::task::spawn_blocking(move || engine.discover());
    match tokio::time::timeout(state.services_timeout, task).await {
        Ok(Ok(records)) => Json(records).into_response(),
        Ok(Err(err)) => failure("/api/services", StatusCode::INTERNAL_SERVER_ERROR, err),
        Err(_) => failure(
            "/api/services",
            StatusCode::GATEWAY_TIMEOUT,
            "service discovery timed out",
        ),
    }
}

async fn files(State(state): State<AppState>, Query(query): Query<FilesQuery>) -> Response {
    let path = query
        .path
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| state.file_browser_root.to_string());
    match tokio::task::spawn_blocking(move || list_directory(path)).await {
        Ok(Ok(listing)) => Json(listing).into_response(),
        Ok(Err(err)) => json_error(StatusCode::BAD_REQUEST, err.to_string()),
        Err(err) => failure("/api/files", StatusCode::INTERNAL_SERVER_ERROR, err),
    }
}

async fn network() -> Response {
    match tokio::task::spawn_blocking(network_status).await {
        Ok(summary) => Json(summary).into_response(),
        Err(err) => failure("/api/network", StatusCode::INTERNAL_SERVER_ERROR, err),
    }
}

fn failure(route: &'static str, status: StatusCode, err: impl std::fmt::Display) -> Response {
    let message = err.to_string();
    LogEvent::RequestFailed {
        route,
        error: Cow::Borrowed(message.as_str()),
    }
    .emit();
    json_error(status, message)
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}

fn map_io(e: impl std::error::Error + Send + Sync + 'static) -> HomeserverError {
    HomeserverError::System(format!("I/O/Serve error: {e}"))
}
