// Wire models (camelCase JSON)

mod container;
mod health;
mod status;

pub use container::{ContainerRecord, ContainerSummary, DockerStatus, count_running};
pub use health::{HealthReading, HealthSample};
pub use status::{
    ContainersSection, DockerSection, HealthResponse, HealthSection, HealthStatus, MetricsReport,
    PerformanceSection, PlatformInfo, RateSection, ResourcesSection, ServerSection, ServiceState,
    ServicesSection, StatusReport, SystemReport, UptimeSection,
};

/// Current UTC time, ISO-8601 with milliseconds and a `Z` suffix.
pub fn iso_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
