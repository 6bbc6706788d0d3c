// Shared test helpers: fake container runtime, health and platform sources

#![allow(dead_code)]

use async_trait::async_trait;
use dockstatus::config::AppConfig;
use dockstatus::docker_repo::{ContainerRuntime, RuntimeError};
use dockstatus::health::{HealthSampler, HealthSource, Thresholds};
use dockstatus::metrics::ServerMetrics;
use dockstatus::models::{ContainerRecord, ContainerSummary, HealthReading, PlatformInfo};
use dockstatus::routes;
use dockstatus::sysinfo_repo::{PlatformSource, SysinfoRepo};
use std::sync::Arc;

/// Runtime returning fixed listings, or failing every call.
pub struct FakeRuntime {
    running: Vec<ContainerSummary>,
    all: Vec<ContainerRecord>,
    fail: bool,
}

impl FakeRuntime {
    pub fn with_fixtures() -> Self {
        let record = |v: serde_json::Value| v.as_object().cloned().unwrap();
        Self {
            running: vec![
                ContainerSummary {
                    name: "web".into(),
                    status: "Up 2 hours".into(),
                },
                ContainerSummary {
                    name: "api".into(),
                    status: "Up 5 minutes".into(),
                },
            ],
            all: vec![
                record(serde_json::json!({"Id": "a1", "Names": ["/web"], "State": "running", "Status": "Up 2 hours"})),
                record(serde_json::json!({"Id": "b2", "Names": ["/api"], "State": "running", "Status": "Up 5 minutes"})),
                record(serde_json::json!({"Id": "c3", "Names": ["/migrate"], "State": "exited", "Status": "Exited (0) 1 hour ago"})),
            ],
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            running: vec![],
            all: vec![],
            fail: true,
        }
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn list_running(&self) -> Result<Vec<ContainerSummary>, RuntimeError> {
        if self.fail {
            return Err(RuntimeError::Unavailable("docker: command not found".into()));
        }
        Ok(self.running.clone())
    }

    async fn list_all(&self) -> Result<Vec<ContainerRecord>, RuntimeError> {
        if self.fail {
            return Err(RuntimeError::Unavailable("docker: command not found".into()));
        }
        Ok(self.all.clone())
    }
}

pub struct FixedHealth(pub HealthReading);

impl FixedHealth {
    pub fn new(cpu: f64, memory: f64, disk: f64) -> Self {
        Self(HealthReading { cpu, memory, disk })
    }
}

#[async_trait]
impl HealthSource for FixedHealth {
    async fn read(&self) -> anyhow::Result<HealthReading> {
        Ok(self.0)
    }
}

pub struct FailingHealth;

#[async_trait]
impl HealthSource for FailingHealth {
    async fn read(&self) -> anyhow::Result<HealthReading> {
        anyhow::bail!("metrics source unreachable")
    }
}

pub struct PanickingHealth;

#[async_trait]
impl HealthSource for PanickingHealth {
    async fn read(&self) -> anyhow::Result<HealthReading> {
        panic!("sensor table corrupted")
    }
}

pub struct FailingPlatform;

#[async_trait]
impl PlatformSource for FailingPlatform {
    async fn platform_info(&self) -> anyhow::Result<PlatformInfo> {
        anyhow::bail!("sysinfo lock poisoned")
    }
}

pub fn test_app_with_platform(
    runtime: impl ContainerRuntime + 'static,
    source: impl HealthSource + 'static,
    platform: impl PlatformSource + 'static,
    config: AppConfig,
) -> axum::Router {
    routes::app(
        Arc::new(runtime),
        Arc::new(HealthSampler::new(Arc::new(source), Thresholds::default())),
        Arc::new(platform),
        Arc::new(ServerMetrics::new()),
        config,
    )
}

pub fn test_app_with(
    runtime: impl ContainerRuntime + 'static,
    source: impl HealthSource + 'static,
    config: AppConfig,
) -> axum::Router {
    test_app_with_platform(runtime, source, SysinfoRepo::new(), config)
}

pub fn test_app(
    runtime: impl ContainerRuntime + 'static,
    source: impl HealthSource + 'static,
) -> axum::Router {
    test_app_with(runtime, source, AppConfig::default())
}
