// Health sample models

use serde::{Deserialize, Serialize};

/// Raw utilization percentages from a health source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthReading {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
}

/// A judged reading. A failed read is still a sample: `healthy: false` plus `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSample {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

impl HealthSample {
    pub fn from_reading(reading: HealthReading, healthy: bool) -> Self {
        Self {
            healthy,
            cpu: Some(reading.cpu),
            memory: Some(reading.memory),
            disk: Some(reading.disk),
            error: None,
            timestamp: super::iso_timestamp(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            healthy: false,
            cpu: None,
            memory: None,
            disk: None,
            error: Some(message.into()),
            timestamp: super::iso_timestamp(),
        }
    }
}
