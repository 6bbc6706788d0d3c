// Container runtime queries via bollard

mod convert;

use crate::metrics::duration_ms;
use crate::models::{ContainerRecord, ContainerSummary, DockerStatus};
use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::ListContainersOptions;
use std::time::Duration;
use thiserror::Error;
use tracing::{instrument, warn};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("container runtime unavailable: {0}")]
    Unavailable(String),
    #[error("container runtime error: {0}")]
    Api(#[from] bollard::errors::Error),
    #[error("container runtime did not respond within {0} ms")]
    Timeout(u64),
    #[error("unexpected container record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The two listings the dashboard needs from the local container runtime.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Running containers only, name + status text.
    async fn list_running(&self) -> Result<Vec<ContainerSummary>, RuntimeError>;

    /// Every container, as the runtime describes it.
    async fn list_all(&self) -> Result<Vec<ContainerRecord>, RuntimeError>;
}

/// Summary used by /api/status and /api/metrics. A failing runtime reads as offline, never as an error.
pub async fn docker_status(runtime: &dyn ContainerRuntime) -> DockerStatus {
    match runtime.list_running().await {
        Ok(containers) => DockerStatus::from_running(containers),
        Err(e) => {
            warn!(error = %e, "Docker status query failed, reporting offline");
            DockerStatus::offline()
        }
    }
}

pub struct DockerRepo {
    docker: Option<Docker>,
    timeout: Duration,
}

impl DockerRepo {
    /// Connects to the local daemon socket (`DOCKER_HOST` is honoured). Does not ping.
    pub fn connect(timeout: Duration) -> anyhow::Result<Self> {
        let docker = Docker::connect_with_local_defaults()?;
        Ok(Self {
            docker: Some(docker),
            timeout,
        })
    }

    /// A repo with no client; every query fails with `RuntimeError::Unavailable`.
    pub fn unavailable(timeout: Duration) -> Self {
        Self {
            docker: None,
            timeout,
        }
    }

    fn client(&self) -> Result<&Docker, RuntimeError> {
        self.docker
            .as_ref()
            .ok_or_else(|| RuntimeError::Unavailable("no Docker client".into()))
    }

    async fn list(&self, all: bool) -> Result<Vec<bollard::models::ContainerSummary>, RuntimeError> {
        let docker = self.client()?;
        let options = ListContainersOptions {
            all,
            ..Default::default()
        };
        match tokio::time::timeout(self.timeout, docker.list_containers(Some(options))).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(RuntimeError::Timeout(duration_ms(self.timeout))),
        }
    }
}

#[async_trait]
impl ContainerRuntime for DockerRepo {
    #[instrument(skip(self), fields(repo = "docker", operation = "list_running"))]
    async fn list_running(&self) -> Result<Vec<ContainerSummary>, RuntimeError> {
        let containers = self.list(false).await?;
        Ok(containers.iter().map(convert::summarize).collect())
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "list_all"))]
    async fn list_all(&self) -> Result<Vec<ContainerRecord>, RuntimeError> {
        let containers = self.list(true).await?;
        containers
            .iter()
            .map(|c| convert::to_record(c).map_err(RuntimeError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unavailable_repo_fails_both_listings() {
        let repo = DockerRepo::unavailable(Duration::from_millis(100));
        assert!(matches!(
            repo.list_running().await,
            Err(RuntimeError::Unavailable(_))
        ));
        assert!(matches!(repo.list_all().await, Err(RuntimeError::Unavailable(_))));
    }

    /// Daemon endpoint that accepts connections and never answers.
    async fn silent_daemon() -> (String, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = format!("tcp://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        (addr, handle)
    }

    fn repo_for(addr: &str, timeout: Duration) -> DockerRepo {
        let docker = Docker::connect_with_http(addr, 120, bollard::API_DEFAULT_VERSION).unwrap();
        DockerRepo {
            docker: Some(docker),
            timeout,
        }
    }

    #[tokio::test]
    async fn hung_runtime_times_out() {
        let (addr, daemon) = silent_daemon().await;
        let repo = repo_for(&addr, Duration::from_millis(150));

        let started = std::time::Instant::now();
        assert!(matches!(
            repo.list_running().await,
            Err(RuntimeError::Timeout(150))
        ));
        assert!(started.elapsed() < Duration::from_secs(5));

        let err = repo.list_all().await.unwrap_err();
        assert!(matches!(err, RuntimeError::Timeout(150)));
        assert_eq!(
            crate::error::AppError::from(err).status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );

        assert_eq!(docker_status(&repo).await, DockerStatus::offline());
        daemon.abort();
    }

    #[tokio::test]
    async fn docker_status_degrades_to_offline() {
        let repo = DockerRepo::unavailable(Duration::from_millis(100));
        assert_eq!(docker_status(&repo).await, DockerStatus::offline());
    }
}
