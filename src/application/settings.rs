//! # Coverage Settings
//!
//! The supervisor coverage check interval. Shared across message tasks and the
//! coverage monitor; every write is a single atomic store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const MILLIS_PER_MINUTE: u64 = 60_000;

#[derive(Debug, Clone)]
pub struct CoverageSettings {
    interval_ms: Arc<AtomicU64>,
}

impl CoverageSettings {
    pub fn new(interval_minutes: u64) -> Self {
        Self {
            interval_ms: Arc::new(AtomicU64::new(
                interval_minutes.max(1).saturating_mul(MILLIS_PER_MINUTE),
            )),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::SeqCst))
    }

    pub fn interval_minutes(&self) -> u64 {
        self.interval_ms.load(Ordering::SeqCst) / MILLIS_PER_MINUTE
    }

    /// Zero is clamped to one minute; callers validate user input first.
    pub fn set_interval_minutes(&self, minutes: u64) {
        let ms = minutes.max(1).saturating_mul(MILLIS_PER_MINUTE);
        self.interval_ms.store(ms, Ordering::SeqCst);
        tracing::info!("Coverage check interval set to {} minutes", minutes.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_value() {
        let settings = CoverageSettings::new(10);
        let other = settings.clone();
        other.set_interval_minutes(5);
        assert_eq!(settings.interval_minutes(), 5);
        assert_eq!(settings.interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_zero_clamped() {
        let settings = CoverageSettings::new(0);
        assert_eq!(settings.interval_minutes(), 1);
        settings.set_interval_minutes(0);
        assert_eq!(settings.interval_minutes(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_writers() {
        let settings = CoverageSettings::new(10);
        let mut handles = Vec::new();
        for minutes in 1..=8u64 {
            let s = settings.clone();
            handles.push(tokio::spawn(async move { s.set_interval_minutes(minutes) }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert!((1..=8).contains(&settings.interval_minutes()));
    }
}
