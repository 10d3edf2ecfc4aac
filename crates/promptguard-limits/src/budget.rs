//! # Per-Detector Time-Slice Budget
//!
//! Adapts the synchronous pre-check-then-consume gas-budget idiom into an
//! async wrapper: each detector gets an equal slice of the overall
//! `max_validation_time_ms` budget, enforced with `tokio::time::timeout`
//! rather than a manual counter, since detector work here is async I/O-free
//! CPU work dispatched onto `tokio::spawn`.

use std::future::Future;
use std::time::Duration;

use crate::error::{LimitsError, Result};

/// Minimum slice granted to any single detector, regardless of how many
/// detectors are registered. Prevents a large detector count from starving
/// every detector to a zero-duration timeout.
const MIN_SLICE_MS: u64 = 1;

/// Divides a total validation time budget evenly across detectors.
#[derive(Debug, Clone, Copy)]
pub struct TimeSliceBudget {
    total_ms: u64,
    detector_count: usize,
}

impl TimeSliceBudget {
    /// Build a budget for `detector_count` detectors sharing `total_ms`
    /// of overall validation time.
    pub const fn new(total_ms: u64, detector_count: usize) -> Self {
        Self { total_ms, detector_count }
    }

    /// The time slice granted to a single detector.
    pub fn slice(&self) -> Duration {
        if self.detector_count == 0 {
            return Duration::from_millis(self.total_ms.max(MIN_SLICE_MS));
        }
        let per_detector = self.total_ms / self.detector_count as u64;
        Duration::from_millis(per_detector.max(MIN_SLICE_MS))
    }

    /// Run `fut` under this budget's time slice, labeling the error with
    /// `detector_name` on timeout.
    pub async fn run<F, T>(&self, detector_name: &str, fut: F) -> Result<T>
    where
        F: Future<Output = T>,
    {
        let slice = self.slice();
        let started = tokio::time::Instant::now();
        match tokio::time::timeout(slice, fut).await {
            Ok(value) => Ok(value),
            Err(_) => {
                tracing::warn!(detector = detector_name, slice_ms = slice.as_millis() as u64, "detector exceeded its time slice");
                Err(LimitsError::SliceExhausted {
                    detector: detector_name.to_string(),
                    elapsed_ms: started.elapsed().as_millis() as u64,
                    slice_ms: slice.as_millis() as u64,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_divides_evenly_with_floor() {
        let budget = TimeSliceBudget::new(100, 8);
        assert_eq!(budget.slice(), Duration::from_millis(12));
    }

    #[test]
    fn slice_never_drops_below_minimum() {
        let budget = TimeSliceBudget::new(5, 8);
        assert_eq!(budget.slice(), Duration::from_millis(MIN_SLICE_MS));
    }

    #[test]
    fn zero_detectors_uses_total_budget() {
        let budget = TimeSliceBudget::new(50, 0);
        assert_eq!(budget.slice(), Duration::from_millis(50));
    }

    #[tokio::test]
    async fn run_returns_value_when_within_slice() {
        let budget = TimeSliceBudget::new(100, 1);
        let result = budget.run("fast", async { 42 }).await.unwrap();
        assert_eq!(result, 42);
    }

    #[tokio::test]
    async fn run_times_out_when_over_slice() {
        let budget = TimeSliceBudget::new(8, 8); // 1ms slice
        let result = budget
            .run("slow", async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                42
            })
            .await;
        assert!(matches!(result, Err(LimitsError::SliceExhausted { .. })));
    }
}
