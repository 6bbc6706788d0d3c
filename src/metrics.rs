// Process-wide request counters and the uptime / rate helpers built on them.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Floor for the elapsed-hours divisor, so the rate right after start stays sane.
const MIN_HOURS_RUNNING: f64 = 0.1;

/// Request accounting for the lifetime of the server.
///
/// `request_count` is bumped before the timing pair, so `response_time_count <= request_count`
/// holds for any reader. All counters only ever grow.
#[derive(Debug)]
pub struct ServerMetrics {
    started: Instant,
    started_at: chrono::DateTime<chrono::Utc>,
    request_count: AtomicU64,
    total_response_time_ms: AtomicU64,
    response_time_count: AtomicU64,
}

/// Raw counters at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub request_count: u64,
    pub total_response_time: u64,
    pub response_time_count: u64,
    pub average_response_time: u64,
    pub requests_per_hour: u64,
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerMetrics {
    /// Fresh counters; the start time is now.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            started_at: chrono::Utc::now(),
            request_count: AtomicU64::new(0),
            total_response_time_ms: AtomicU64::new(0),
            response_time_count: AtomicU64::new(0),
        }
    }

    pub fn record_request(&self, elapsed: Duration) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.total_response_time_ms
            .fetch_add(duration_ms(elapsed), Ordering::Relaxed);
        self.response_time_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Wall-clock start, ISO-8601.
    pub fn started_at(&self) -> String {
        self.started_at
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }

    pub fn uptime_string(&self) -> String {
        uptime_string(self.elapsed())
    }

    pub fn average_response_time_ms(&self) -> u64 {
        average_response_time_ms(
            self.total_response_time_ms.load(Ordering::Relaxed),
            self.response_time_count.load(Ordering::Relaxed),
        )
    }

    pub fn requests_per_hour(&self) -> u64 {
        requests_per_hour(
            self.request_count.load(Ordering::Relaxed),
            self.elapsed().as_secs_f64() / 3600.0,
        )
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        // Timing pair first: a concurrent record can only make request_count larger.
        let response_time_count = self.response_time_count.load(Ordering::Relaxed);
        let total_response_time = self.total_response_time_ms.load(Ordering::Relaxed);
        let request_count = self.request_count.load(Ordering::Relaxed);
        MetricsSnapshot {
            request_count,
            total_response_time,
            response_time_count,
            average_response_time: average_response_time_ms(
                total_response_time,
                response_time_count,
            ),
            requests_per_hour: requests_per_hour(
                request_count,
                self.elapsed().as_secs_f64() / 3600.0,
            ),
        }
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
pub fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// `"{h}h {m}m"` once an hour has passed, otherwise `"{m}m"`. Truncates, never rounds.
pub fn uptime_string(elapsed: Duration) -> String {
    let total_minutes = elapsed.as_secs() / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

pub fn average_response_time_ms(total_ms: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    (total_ms as f64 / count as f64).round() as u64
}

pub fn requests_per_hour(request_count: u64, elapsed_hours: f64) -> u64 {
    let hours = elapsed_hours.max(MIN_HOURS_RUNNING);
    (request_count as f64 / hours).round() as u64
}

/// Simulated availability from a unit draw `r` in `[0, 1)`; always within `[99.0, 100.0]`.
pub fn uptime_percentage(r: f64) -> f64 {
    let pct = (100.0 - r.clamp(0.0, 1.0)).max(99.0);
    (pct * 10.0).round() / 10.0
}
