//! Observability counters and the alert callback registry.
//!
//! Counters use relaxed atomic increments, mirroring the workspace's
//! existing gas-budget counters rather than introducing a metrics crate
//! the rest of the corpus never reaches for.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// The kind of alert an external sink receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    HighLatency,
    HighMemoryPressure,
    DetectorTimeout,
}

/// Payload delivered alongside an [`AlertKind`].
#[derive(Debug, Clone)]
pub struct AlertPayload {
    pub message: String,
    pub value: f64,
}

type AlertCallback = Box<dyn Fn(AlertKind, &AlertPayload) + Send + Sync>;

/// Read-and-reset observability counters for one validator instance.
#[derive(Default)]
pub struct Metrics {
    pub validations_total: AtomicU64,
    pub cache_hits: AtomicU64,
    pub cache_misses: AtomicU64,
    pub detector_timeouts: AtomicU64,
    pub total_latency_micros: AtomicU64,
    alert_callbacks: Mutex<Vec<AlertCallback>>,
}

/// A point-in-time snapshot of [`Metrics`], suitable for `get_metrics()`.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    pub validations_total: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub detector_timeouts: u64,
    pub avg_latency_micros: f64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_validation(&self, latency_micros: u64) {
        self.validations_total.fetch_add(1, Ordering::Relaxed);
        self.total_latency_micros.fetch_add(latency_micros, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_detector_timeout(&self) {
        self.detector_timeouts.fetch_add(1, Ordering::Relaxed);
    }

    /// Register a callback invoked whenever `fire_alert` is called.
    pub fn register_alert_callback(&self, callback: AlertCallback) {
        self.alert_callbacks.lock().expect("alert callback mutex poisoned").push(callback);
    }

    /// Deliver an alert to every registered callback.
    pub fn fire_alert(&self, kind: AlertKind, payload: AlertPayload) {
        let callbacks = self.alert_callbacks.lock().expect("alert callback mutex poisoned");
        for callback in callbacks.iter() {
            callback(kind, &payload);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let validations_total = self.validations_total.load(Ordering::Relaxed);
        let total_latency = self.total_latency_micros.load(Ordering::Relaxed);
        let avg_latency_micros = if validations_total == 0 { 0.0 } else { total_latency as f64 / validations_total as f64 };

        MetricsSnapshot {
            validations_total,
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            detector_timeouts: self.detector_timeouts.load(Ordering::Relaxed),
            avg_latency_micros,
        }
    }

    /// Zero every counter. Registered alert callbacks are left in place.
    pub fn reset(&self) {
        self.validations_total.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        self.detector_timeouts.store(0, Ordering::Relaxed);
        self.total_latency_micros.store(0, Ordering::Relaxed);
    }
}
