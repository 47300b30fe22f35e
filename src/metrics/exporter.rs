use std::fmt::Display;
use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::metrics::snapshot::SetAssociativeMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// by Prometheus or forwarded to an OpenTelemetry collector.
///
/// # Example
///
/// ```
/// use setassoc::metrics::exporter::PrometheusTextExporter;
/// use setassoc::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
/// use setassoc::SetAssociativeCache;
///
/// let mut cache = SetAssociativeCache::<u64, u64>::try_new(16, 4)?;
/// cache.put(1, 10)?;
/// cache.get(&1);
///
/// let exporter = PrometheusTextExporter::new("sacache", Vec::new());
/// exporter.export(&cache.snapshot());
///
/// let text = String::from_utf8(exporter.into_inner())?;
/// assert!(text.contains("sacache_get_hits_total 1"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_metric(&self, kind: &str, name: &str, value: impl Display) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, name: &str, value: u64) {
        self.write_metric("counter", name, value);
    }

    fn write_gauge(&self, name: &str, value: impl Display) {
        self.write_metric("gauge", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<SetAssociativeMetricsSnapshot>
    for PrometheusTextExporter<W>
{
    fn export(&self, snapshot: &SetAssociativeMetricsSnapshot) {
        self.write_counter(&self.metric_name("get_calls_total"), snapshot.get_calls);
        self.write_counter(&self.metric_name("get_hits_total"), snapshot.get_hits);
        self.write_counter(&self.metric_name("get_misses_total"), snapshot.get_misses);
        self.write_counter(
            &self.metric_name("insert_calls_total"),
            snapshot.insert_calls,
        );
        self.write_counter(
            &self.metric_name("insert_updates_total"),
            snapshot.insert_updates,
        );
        self.write_counter(&self.metric_name("insert_new_total"), snapshot.insert_new);
        self.write_counter(&self.metric_name("evictions_total"), snapshot.evictions);
        self.write_counter(
            &self.metric_name("contract_violations_total"),
            snapshot.contract_violations,
        );
        self.write_gauge(&self.metric_name("hit_ratio"), snapshot.hit_ratio);
        self.write_gauge(&self.metric_name("cache_len"), snapshot.cache_len);
        self.write_gauge(&self.metric_name("capacity"), snapshot.capacity);
        self.write_gauge(&self.metric_name("set_count"), snapshot.set_count);
        self.write_gauge(&self.metric_name("lines_per_set"), snapshot.lines_per_set);
    }
}
