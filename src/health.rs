// Health sampling: a pluggable reading source plus the thresholds that judge it.

use crate::config::HealthConfig;
use crate::models::{HealthReading, HealthSample};
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use tracing::warn;

/// Anything that can report current cpu / memory / disk utilization in percent.
#[async_trait]
pub trait HealthSource: Send + Sync {
    async fn read(&self) -> anyhow::Result<HealthReading>;
}

/// Synthetic readings in fixed, comfortably healthy bands.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedHealthSource;

impl SimulatedHealthSource {
    pub const CPU_BAND: std::ops::Range<f64> = 10.0..40.0;
    pub const MEMORY_BAND: std::ops::Range<f64> = 20.0..60.0;
    pub const DISK_BAND: std::ops::Range<f64> = 30.0..60.0;

    fn draw(rng: &mut impl Rng, band: std::ops::Range<f64>) -> f64 {
        round1(rng.gen_range(band))
    }
}

#[async_trait]
impl HealthSource for SimulatedHealthSource {
    async fn read(&self) -> anyhow::Result<HealthReading> {
        let mut rng = rand::thread_rng();
        Ok(HealthReading {
            cpu: Self::draw(&mut rng, Self::CPU_BAND),
            memory: Self::draw(&mut rng, Self::MEMORY_BAND),
            disk: Self::draw(&mut rng, Self::DISK_BAND),
        })
    }
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Upper bounds (exclusive) for a healthy reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            cpu: 80.0,
            memory: 85.0,
            disk: 90.0,
        }
    }
}

impl From<&HealthConfig> for Thresholds {
    fn from(c: &HealthConfig) -> Self {
        Self {
            cpu: c.cpu_threshold,
            memory: c.memory_threshold,
            disk: c.disk_threshold,
        }
    }
}

impl Thresholds {
    pub fn is_healthy(&self, r: &HealthReading) -> bool {
        r.cpu < self.cpu && r.memory < self.memory && r.disk < self.disk
    }
}

/// Turns source readings into samples. Never fails: a source error becomes an unhealthy sample.
pub struct HealthSampler {
    source: Arc<dyn HealthSource>,
    thresholds: Thresholds,
}

impl HealthSampler {
    pub fn new(source: Arc<dyn HealthSource>, thresholds: Thresholds) -> Self {
        Self { source, thresholds }
    }

    pub async fn sample(&self) -> HealthSample {
        match self.source.read().await {
            Ok(reading) => {
                HealthSample::from_reading(reading, self.thresholds.is_healthy(&reading))
            }
            Err(e) => {
                warn!(error = %e, "Health sampling failed");
                HealthSample::failed(e.to_string())
            }
        }
    }
}
