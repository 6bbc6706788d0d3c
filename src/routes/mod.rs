// HTTP routes

mod http;
mod middleware;

use axum::{
    Router,
    handler::Handler,
    routing::{MethodRouter, any, get},
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::AppConfig;
use crate::docker_repo::ContainerRuntime;
use crate::health::HealthSampler;
use crate::metrics::ServerMetrics;
use crate::sysinfo_repo::PlatformSource;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) runtime: Arc<dyn ContainerRuntime>,
    pub(crate) sampler: Arc<HealthSampler>,
    pub(crate) platform: Arc<dyn PlatformSource>,
    pub(crate) metrics: Arc<ServerMetrics>,
    pub(crate) config: AppConfig,
}

/// GET route whose other methods answer with the JSON 404 envelope instead of a bare 405.
fn api_get<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(http::api_not_found)
}

pub fn app(
    runtime: Arc<dyn ContainerRuntime>,
    sampler: Arc<HealthSampler>,
    platform: Arc<dyn PlatformSource>,
    metrics: Arc<ServerMetrics>,
    config: AppConfig,
) -> Router {
    let expose_details = !config.is_production();
    let static_dir = config.server.static_dir.clone();
    let state = AppState {
        runtime,
        sampler,
        platform,
        metrics: metrics.clone(),
        config,
    };

    let router = Router::new()
        .route("/health", get(http::health_handler)) // GET /health
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/status", api_get(http::status_handler)) // GET /api/status
        .route("/api/metrics", api_get(http::metrics_handler)) // GET /api/metrics
        .route("/api/containers", api_get(http::containers_handler)) // GET /api/containers
        .route("/api/system", api_get(http::system_handler)) // GET /api/system
        .route("/api", any(http::api_not_found))
        .route("/api/", any(http::api_not_found))
        .route("/api/{*rest}", any(http::api_not_found)); // anything else under /api

    let router = match static_dir {
        Some(dir) => {
            tracing::info!("Serving static pages from {}", dir);
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    };

    router
        .layer(CatchPanicLayer::custom(
            move |panic: Box<dyn std::any::Any + Send + 'static>| {
                middleware::panic_response(panic, expose_details)
            },
        ))
        .layer(CorsLayer::new().allow_origin(Any))
        .layer(axum::middleware::from_fn_with_state(
            metrics,
            middleware::track_requests,
        ))
        .with_state(state)
}
