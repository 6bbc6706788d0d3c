// GET handlers: health, version, status, metrics, containers, system

use axum::{
    Json,
    extract::{OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
};
use rand::Rng;
use serde_json::json;

use super::AppState;
use crate::docker_repo::docker_status;
use crate::error::AppError;
use crate::metrics::uptime_percentage;
use crate::models::*;
use crate::version::{DESCRIPTION, NAME, VERSION};

/// GET /health — 200 when the sample is healthy, 503 otherwise.
pub(super) async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let sample = state.sampler.sample().await;
    let (code, status) = if sample.healthy {
        (StatusCode::OK, HealthStatus::Healthy)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Unhealthy)
    };
    (
        code,
        Json(HealthResponse {
            status,
            timestamp: iso_timestamp(),
            details: sample,
        }),
    )
}

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(json!({
        "name": NAME,
        "version": VERSION,
        "description": DESCRIPTION,
    }))
}

/// GET /api/status — server, services and rate summary. Docker trouble shows up as "offline".
pub(super) async fn status_handler(State(state): State<AppState>) -> Json<StatusReport> {
    let (docker, sample) = tokio::join!(
        docker_status(state.runtime.as_ref()),
        state.sampler.sample()
    );
    let metrics = state.metrics.snapshot();

    Json(StatusReport {
        server: ServerSection {
            status: ServiceState::Online,
            uptime: state.metrics.uptime_string(),
            version: VERSION.into(),
            environment: state.config.server.environment.clone(),
        },
        services: ServicesSection {
            docker: DockerSection {
                status: if docker.running {
                    ServiceState::Online
                } else {
                    ServiceState::Offline
                },
                containers: docker.container_count,
                details: docker.containers,
            },
            health: HealthSection {
                status: if sample.healthy {
                    ServiceState::Online
                } else {
                    ServiceState::Degraded
                },
                cpu: sample.cpu,
                memory: sample.memory,
                disk: sample.disk,
            },
        },
        metrics: RateSection {
            requests_per_hour: metrics.requests_per_hour,
            average_response_time: metrics.average_response_time,
            total_requests: metrics.request_count,
        },
        timestamp: iso_timestamp(),
    })
}

/// GET /api/metrics — simulated availability plus the raw request counters.
pub(super) async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsReport> {
    let (docker, sample) = tokio::join!(
        docker_status(state.runtime.as_ref()),
        state.sampler.sample()
    );
    let metrics = state.metrics.snapshot();
    let draw: f64 = rand::thread_rng().r#gen();

    Json(MetricsReport {
        uptime: UptimeSection {
            percentage: uptime_percentage(draw),
            formatted: state.metrics.uptime_string(),
            started_at: state.metrics.started_at(),
        },
        performance: PerformanceSection {
            request_count: metrics.request_count,
            response_time_count: metrics.response_time_count,
            total_response_time: metrics.total_response_time,
            average_response_time: metrics.average_response_time,
            requests_per_hour: metrics.requests_per_hour,
        },
        resources: ResourcesSection {
            healthy: sample.healthy,
            cpu: sample.cpu,
            memory: sample.memory,
            disk: sample.disk,
        },
        containers: ContainersSection {
            running: docker.container_count,
            status: if docker.running {
                ServiceState::Online
            } else {
                ServiceState::Offline
            },
        },
        timestamp: iso_timestamp(),
    })
}

/// GET /api/containers — every container; runtime failure is a 500.
pub(super) async fn containers_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let containers = state.runtime.list_all().await?;
    let running = count_running(&containers);
    Ok(Json(json!({
        "total": containers.len(),
        "running": running,
        "containers": containers,
        "timestamp": iso_timestamp(),
    })))
}

/// GET /api/system — platform identity, process info and a fresh health sample.
pub(super) async fn system_handler(
    State(state): State<AppState>,
) -> Result<Json<SystemReport>, AppError> {
    let platform = state
        .platform
        .platform_info()
        .await
        .map_err(AppError::System)?;
    let health = state.sampler.sample().await;
    Ok(Json(SystemReport {
        platform,
        pid: std::process::id(),
        process_uptime: state.metrics.elapsed().as_secs(),
        version: VERSION.into(),
        health,
        timestamp: iso_timestamp(),
    }))
}

/// Any /api path without a route.
pub(super) async fn api_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound {
        path: uri.path().to_string(),
    }
}
