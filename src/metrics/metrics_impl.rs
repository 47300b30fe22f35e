use super::traits::{CoreMetricsRecorder, MetricsReset};

// ---------------------------------------------------------------------------
// SetAssociativeMetrics
// ---------------------------------------------------------------------------

/// Counters owned by a [`SetAssociativeCache`](crate::SetAssociativeCache).
///
/// Monotonically non-decreasing until [`reset_metrics`](MetricsReset::reset_metrics).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SetAssociativeMetrics {
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evictions: u64,
    pub contract_violations: u64,
}

impl SetAssociativeMetrics {
    #[inline]
    pub fn get_calls(&self) -> u64 {
        self.get_hits + self.get_misses
    }

    /// Fraction of `get` calls that hit, or `0.0` before the first lookup.
    pub fn hit_ratio(&self) -> f64 {
        match self.get_calls() {
            0 => 0.0,
            calls => self.get_hits as f64 / calls as f64,
        }
    }
}

impl CoreMetricsRecorder for SetAssociativeMetrics {
    fn record_get_hit(&mut self) {
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_eviction(&mut self) {
        self.evictions += 1;
    }
    fn record_contract_violation(&mut self) {
        self.contract_violations += 1;
    }
}

impl MetricsReset for SetAssociativeMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}
