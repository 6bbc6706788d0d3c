use anyhow::Result;
use dockstatus::config::{AppConfig, HealthSourceKind};
use dockstatus::docker_repo::{ContainerRuntime, DockerRepo};
use dockstatus::health::{HealthSampler, HealthSource, SimulatedHealthSource, Thresholds};
use dockstatus::metrics::ServerMetrics;
use dockstatus::*;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = AppConfig::load()?;
    tracing::info!(
        "{} {} starting ({} mode)",
        version::NAME,
        version::VERSION,
        app_config.server.environment
    );

    let query_timeout = Duration::from_millis(app_config.docker.query_timeout_ms);
    let runtime: Arc<dyn ContainerRuntime> = match DockerRepo::connect(query_timeout) {
        Ok(repo) => Arc::new(repo),
        Err(e) => {
            tracing::warn!("Docker client unavailable, container status will read offline: {}", e);
            Arc::new(DockerRepo::unavailable(query_timeout))
        }
    };

    let sysinfo_repo = Arc::new(sysinfo_repo::SysinfoRepo::new());
    let source: Arc<dyn HealthSource> = match app_config.health.source {
        HealthSourceKind::Simulated => Arc::new(SimulatedHealthSource),
        HealthSourceKind::Sysinfo => sysinfo_repo.clone(),
    };
    let sampler = Arc::new(HealthSampler::new(
        source,
        Thresholds::from(&app_config.health),
    ));
    let metrics = Arc::new(ServerMetrics::new());

    let app = routes::app(
        runtime,
        sampler,
        sysinfo_repo,
        metrics,
        app_config.clone(),
    );
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}
