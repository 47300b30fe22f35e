//! Hit/miss/eviction accounting for the cache.
//!
//! The counters are part of the cache's public contract, so unlike the
//! policy-specific recorders of larger cache libraries this module is always
//! compiled.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::SetAssociativeMetrics;
pub use snapshot::SetAssociativeMetricsSnapshot;
pub use traits::{CoreMetricsRecorder, MetricsExporter, MetricsReset, MetricsSnapshotProvider};
