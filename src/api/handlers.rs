//! HTTP handlers for the info and health endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, Method, Uri};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::host::{HostInfo, HostInfoProvider, SysinfoProvider, UNKNOWN};

/// Service name reported on `/`.
pub const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");
/// Service version reported on `/`.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Service description reported on `/`.
pub const SERVICE_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
/// Framework label reported on `/`. A fixed label, not derived.
pub const FRAMEWORK: &str = "Axum";

/// Application state shared with handlers.
///
/// Immutable after construction; every request reads the same start time
/// and provider, so handlers need no locking.
#[derive(Clone)]
pub struct AppState {
    /// Captured once at startup, used to derive uptime.
    pub started_at: DateTime<Utc>,
    /// Source of host facts.
    pub host_info: Arc<dyn HostInfoProvider>,
}

impl AppState {
    /// Create state with the real host-info provider, starting the
    /// uptime clock now.
    pub fn new() -> Self {
        Self::with_provider(Utc::now(), Arc::new(SysinfoProvider))
    }

    /// Create state with an explicit start time and provider.
    pub fn with_provider(
        started_at: DateTime<Utc>,
        host_info: Arc<dyn HostInfoProvider>,
    ) -> Self {
        Self {
            started_at,
            host_info,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Uptime since process start, as raw seconds and a human-readable string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uptime {
    /// Whole seconds since start. Never negative.
    pub seconds: i64,
    /// "<H> hours, <M> minutes".
    pub human: String,
}

/// Compute uptime between two instants, clamping to zero if the wall
/// clock moved backward.
pub fn uptime_between(started_at: DateTime<Utc>, now: DateTime<Utc>) -> Uptime {
    let seconds = (now - started_at).num_seconds().max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;

    Uptime {
        seconds,
        human: format!("{} hours, {} minutes", hours, minutes),
    }
}

/// Fixed service metadata section of the index response.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    /// Service name.
    pub name: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Framework label.
    pub framework: &'static str,
}

/// Runtime section of the index response.
#[derive(Debug, Serialize)]
pub struct RuntimeInfo {
    /// Seconds since process start.
    pub uptime_seconds: i64,
    /// Human-readable uptime.
    pub uptime_human: String,
    /// Current time, RFC 3339 with UTC offset.
    pub current_time: String,
    /// Always "UTC".
    pub timezone: &'static str,
}

/// Echoed attributes of the inbound request.
#[derive(Debug, Serialize)]
pub struct RequestInfo {
    /// Peer IP, or "unknown" when the transport does not expose one.
    pub client_ip: String,
    /// User-Agent header, or "unknown" when absent.
    pub user_agent: String,
    /// HTTP method.
    pub method: String,
    /// URL path.
    pub path: String,
}

/// One entry of the static endpoint catalog.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    /// Route path.
    pub path: &'static str,
    /// Accepted method.
    pub method: &'static str,
    /// What the endpoint serves.
    pub description: &'static str,
}

/// Index response body.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    /// Fixed service metadata.
    pub service: ServiceInfo,
    /// Host facts snapshot.
    pub system: HostInfo,
    /// Uptime and current time.
    pub runtime: RuntimeInfo,
    /// Echoed request attributes.
    pub request: RequestInfo,
    /// Static catalog of the two routes.
    pub endpoints: Vec<EndpointInfo>,
}

/// Health response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests.
    pub status: &'static str,
    /// Current time, RFC 3339 UTC.
    pub timestamp: String,
    /// Seconds since process start.
    pub uptime_seconds: i64,
}

/// The static catalog served under `endpoints`.
pub fn endpoint_catalog() -> Vec<EndpointInfo> {
    vec![
        EndpointInfo {
            path: "/",
            method: "GET",
            description: "Service information",
        },
        EndpointInfo {
            path: "/health",
            method: "GET",
            description: "Health check",
        },
    ]
}

/// Main endpoint - service, system, runtime, and request information.
pub async fn index(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Json<IndexResponse> {
    let now = Utc::now();
    let uptime = uptime_between(state.started_at, now);

    let client_ip = connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(UNKNOWN)
        .to_string();

    info!("Request: {} {}", method, uri.path());

    Json(IndexResponse {
        service: ServiceInfo {
            name: SERVICE_NAME,
            version: SERVICE_VERSION,
            description: SERVICE_DESCRIPTION,
            framework: FRAMEWORK,
        },
        system: state.host_info.host_info(),
        runtime: RuntimeInfo {
            uptime_seconds: uptime.seconds,
            uptime_human: uptime.human,
            current_time: now.to_rfc3339(),
            timezone: "UTC",
        },
        request: RequestInfo {
            client_ip,
            user_agent,
            method: method.to_string(),
            path: uri.path().to_string(),
        },
        endpoints: endpoint_catalog(),
    })
}

/// Health check endpoint. Cheap and quiet, suitable for frequent polling.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = Utc::now();
    let uptime = uptime_between(state.started_at, now);

    debug!("Health check");

    Json(HealthResponse {
        status: "healthy",
        timestamp: now.to_rfc3339(),
        uptime_seconds: uptime.seconds,
    })
}
