// Docker API container summaries -> dashboard models

use crate::models::{ContainerRecord, ContainerSummary};
use bollard::models::ContainerSummary as ApiContainer;

/// Name without the leading '/', falling back to the short id; status text as reported.
pub(super) fn summarize(c: &ApiContainer) -> ContainerSummary {
    let id = c.id.as_deref().unwrap_or_default();
    let name = c
        .names
        .as_ref()
        .and_then(|n| n.first())
        .map(|n| n.trim_start_matches('/').to_string())
        .unwrap_or_else(|| id.chars().take(12).collect());
    ContainerSummary {
        name,
        status: c.status.clone().unwrap_or_default(),
    }
}

/// The container exactly as the API serializes it.
pub(super) fn to_record(c: &ApiContainer) -> Result<ContainerRecord, serde_json::Error> {
    match serde_json::to_value(c)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(serde::de::Error::custom(format!(
            "expected an object, got {}",
            other
        ))),
    }
}
