// Host readings via sysinfo: real health source and platform identity for /api/system.

mod linux;

use crate::health::{HealthSource, round1};
use crate::models::{HealthReading, PlatformInfo};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use sysinfo::{Disks, System};
use tracing::instrument;

/// Host identity reported by /api/system.
#[async_trait]
pub trait PlatformSource: Send + Sync {
    async fn platform_info(&self) -> anyhow::Result<PlatformInfo>;
}

pub struct SysinfoRepo {
    sys: Arc<Mutex<System>>,
    disks: Arc<Mutex<Disks>>,
    last_cpu_refresh: Arc<Mutex<Option<(Instant, f64)>>>,
}

impl Default for SysinfoRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoRepo {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();
        Self {
            sys: Arc::new(Mutex::new(sys)),
            disks: Arc::new(Mutex::new(Disks::new_with_refreshed_list())),
            last_cpu_refresh: Arc::new(Mutex::new(None)),
        }
    }

    /// Global CPU usage, refreshed at most once per `MINIMUM_CPU_UPDATE_INTERVAL`.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_cpu_usage"))]
    pub async fn get_cpu_usage(&self) -> anyhow::Result<f64> {
        let sys = self.sys.clone();
        let last_cpu_refresh = self.last_cpu_refresh.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            let mut last = last_cpu_refresh
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo cpu cache lock poisoned: {}", e))?;

            let now = Instant::now();
            let cached = *last;
            let usage = match cached {
                Some((prev_ts, prev_usage))
                    if now.duration_since(prev_ts) < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL =>
                {
                    prev_usage
                }
                _ => {
                    sys.refresh_cpu_all();
                    let usage = sys.global_cpu_usage() as f64;
                    *last = Some((now, usage));
                    usage
                }
            };
            Ok(usage.clamp(0.0, 100.0))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_memory_usage"))]
    pub async fn get_memory_usage(&self) -> anyhow::Result<f64> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();
            let total = sys.total_memory();
            let used = total.saturating_sub(sys.available_memory());
            Ok(percent(used, total))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    /// Used space across all mounted disks.
    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_disk_usage"))]
    pub async fn get_disk_usage(&self) -> anyhow::Result<f64> {
        let disks = self.disks.clone();
        tokio::task::spawn_blocking(move || {
            let mut disks = disks
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo disks lock poisoned: {}", e))?;
            disks.refresh(false);
            let (total, available) = disks.list().iter().fold((0u64, 0u64), |(t, a), d| {
                (
                    t.saturating_add(d.total_space()),
                    a.saturating_add(d.available_space()),
                )
            });
            anyhow::ensure!(total > 0, "no mounted disks reported");
            Ok(percent(total.saturating_sub(available), total))
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_platform_info"))]
    pub async fn get_platform_info(&self) -> anyhow::Result<PlatformInfo> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();
            let os = linux::read_os_pretty_name()
                .or_else(System::name)
                .unwrap_or_else(|| std::env::consts::OS.into());
            Ok(PlatformInfo {
                os,
                arch: std::env::consts::ARCH.into(),
                platform: std::env::consts::OS.into(),
                hostname: System::host_name().unwrap_or_default(),
                os_version: System::os_version().unwrap_or_default(),
                cpus: sys.cpus().len() as u32,
                total_memory: sys.total_memory(),
                free_memory: sys.available_memory(),
            })
        })
        .await
        .map_err(|e| anyhow::anyhow!("sysinfo task join: {}", e))?
    }
}

fn percent(used: u64, total: u64) -> f64 {
    if total > 0 {
        (used as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

#[async_trait]
impl PlatformSource for SysinfoRepo {
    async fn platform_info(&self) -> anyhow::Result<PlatformInfo> {
        self.get_platform_info().await
    }
}

#[async_trait]
impl HealthSource for SysinfoRepo {
    async fn read(&self) -> anyhow::Result<HealthReading> {
        Ok(HealthReading {
            cpu: round1(self.get_cpu_usage().await?),
            memory: round1(self.get_memory_usage().await?),
            disk: round1(self.get_disk_usage().await?),
        })
    }
}
