//! # Metrics Traits
//!
//! Separates *recording*, *snapshotting*, *resetting* and *export* into
//! small traits so the cache engine only ever writes counters.
//!
//! ```text
//!   SetAssociativeCache ──record_*──► CoreMetricsRecorder (SetAssociativeMetrics)
//!            │
//!            ├──snapshot()──► MetricsSnapshotProvider<S> ──► MetricsExporter<S>
//!            │                   (tests, benches)               (monitoring)
//!            └──reset_metrics()──► MetricsReset   (clear_stats)
//! ```

/// Counters every cache records.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    /// A full set had to give up a slot.
    fn record_eviction(&mut self);
    /// An evictor returned a slot outside its set.
    fn record_contract_violation(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset counters between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
