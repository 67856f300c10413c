use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Cached result of the last health probe against the model service.
///
/// A cached value is fresh while it is younger than the staleness interval;
/// non-forced checks reuse a fresh value instead of probing again.
#[derive(Debug, Clone, Default)]
pub struct HealthState {
    healthy: bool,
    checked_at: Option<Instant>,
    checked_at_wall: Option<DateTime<Utc>>,
}

/// Point-in-time view of [`HealthState`] for API responses.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct HealthSnapshot {
    pub healthy: bool,
    pub last_check: Option<DateTime<Utc>>,
}

impl HealthState {
    /// Cached healthy flag, if it was recorded within `interval`.
    pub fn fresh(&self, interval: Duration) -> Option<bool> {
        match self.checked_at {
            Some(at) if at.elapsed() < interval => Some(self.healthy),
            _ => None,
        }
    }

    pub fn record(&mut self, healthy: bool) {
        self.healthy = healthy;
        self.checked_at = Some(Instant::now());
        self.checked_at_wall = Some(Utc::now());
    }

    pub fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            healthy: self.healthy,
            last_check: self.checked_at_wall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_checked_is_unhealthy_and_stale() {
        let state = HealthState::default();
        assert_eq!(state.fresh(Duration::from_secs(30)), None);
        assert_eq!(
            state.snapshot(),
            HealthSnapshot {
                healthy: false,
                last_check: None
            }
        );
    }

    #[test]
    fn recorded_value_is_fresh_within_interval() {
        let mut state = HealthState::default();
        state.record(true);
        assert_eq!(state.fresh(Duration::from_secs(30)), Some(true));
        assert!(state.snapshot().last_check.is_some());
    }

    #[test]
    fn zero_interval_is_always_stale() {
        let mut state = HealthState::default();
        state.record(true);
        assert_eq!(state.fresh(Duration::ZERO), None);
    }
}
