// Response bodies for /health, /api/status, /api/metrics, /api/system

use serde::{Deserialize, Serialize};

use super::{ContainerSummary, HealthSample};

/// Indicator state the dashboard renders. Docker reports offline, health reports degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Online,
    Offline,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    pub details: HealthSample,
}

/// GET /api/status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub server: ServerSection,
    pub services: ServicesSection,
    pub metrics: RateSection,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSection {
    pub status: ServiceState,
    pub uptime: String,
    pub version: String,
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesSection {
    pub docker: DockerSection,
    pub health: HealthSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerSection {
    pub status: ServiceState,
    pub containers: usize,
    pub details: Vec<ContainerSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSection {
    pub status: ServiceState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSection {
    pub requests_per_hour: u64,
    pub average_response_time: u64,
    pub total_requests: u64,
}

/// GET /api/metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub uptime: UptimeSection,
    pub performance: PerformanceSection,
    pub resources: ResourcesSection,
    pub containers: ContainersSection,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UptimeSection {
    pub percentage: f64,
    pub formatted: String,
    pub started_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSection {
    pub request_count: u64,
    pub response_time_count: u64,
    pub total_response_time: u64,
    pub average_response_time: u64,
    pub requests_per_hour: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesSection {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainersSection {
    pub running: usize,
    pub status: ServiceState,
}

/// Static platform identity; collected by the sysinfo repo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfo {
    pub os: String,
    pub arch: String,
    pub platform: String,
    pub hostname: String,
    pub os_version: String,
    pub cpus: u32,
    pub total_memory: u64,
    pub free_memory: u64,
}

/// GET /api/system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemReport {
    #[serde(flatten)]
    pub platform: PlatformInfo,
    pub pid: u32,
    /// Seconds since this server started.
    pub process_uptime: u64,
    pub version: String,
    pub health: HealthSample,
    pub timestamp: String,
}
