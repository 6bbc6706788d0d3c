// Container listing models

use serde::{Deserialize, Serialize};

/// One running container as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSummary {
    pub name: String,
    /// Raw status text from the runtime, e.g. "Up 3 hours".
    pub status: String,
}

/// Running-container summary; the all-zero value stands in when the runtime is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerStatus {
    pub running: bool,
    pub container_count: usize,
    pub containers: Vec<ContainerSummary>,
}

impl DockerStatus {
    pub fn from_running(containers: Vec<ContainerSummary>) -> Self {
        Self {
            running: true,
            container_count: containers.len(),
            containers,
        }
    }

    pub fn offline() -> Self {
        Self::default()
    }
}

/// Full per-container record as reported by the runtime (PascalCase keys, e.g. `State`).
pub type ContainerRecord = serde_json::Map<String, serde_json::Value>;

/// Number of records whose `State` is "running".
pub fn count_running(records: &[ContainerRecord]) -> usize {
    records
        .iter()
        .filter(|r| {
            r.get("State")
                .and_then(|s| s.as_str())
                .is_some_and(|s| s.eq_ignore_ascii_case("running"))
        })
        .count()
}
