//! Counter vectors with dynamic labels.
//!
//! Labels are flattened into one sorted, pre-rendered key string so lookups
//! stay allocation-light and exposition output is deterministic per label
//! set.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Escape a label value for the exposition format.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<String, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let mut pairs: Vec<String> = labels
            .iter()
            .map(|(k, val)| format!("{k}=\"{}\"", escape_label(val)))
            .collect();
        pairs.sort();
        let key = pairs.join(",");

        self.map
            .entry(key)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(v, Ordering::Relaxed);
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        for entry in self.map.iter() {
            let _ = writeln!(
                out,
                "{name}{{{}}} {}",
                entry.key(),
                entry.value().load(Ordering::Relaxed)
            );
        }
    }
}

/// Per-process counters for the hit counter service.
#[derive(Default)]
pub struct CounterMetrics {
    /// Requests by endpoint, counted or not.
    pub requests: CounterVec,
    /// Visits that reached the store.
    pub visits: CounterVec,
    /// Requests answered from the `previous_count` cookie.
    pub suppressed: CounterVec,
    /// Store failures surfaced as HTTP 500.
    pub store_errors: CounterVec,
}

impl CounterMetrics {
    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.requests.render("tally_http_requests_total", &mut out);
        self.visits.render("tally_visits_recorded_total", &mut out);
        self.suppressed
            .render("tally_visits_suppressed_total", &mut out);
        self.store_errors.render("tally_store_errors_total", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_sorted_and_escaped() {
        let vec = CounterVec::default();
        vec.inc(&[("endpoint", "json"), ("agent", "a\"b")]);
        vec.inc(&[("agent", "a\"b"), ("endpoint", "json")]);

        let mut out = String::new();
        vec.render("test_total", &mut out);
        assert!(out.contains("# TYPE test_total counter"));
        assert!(out.contains("test_total{agent=\"a\\\"b\",endpoint=\"json\"} 2"));
    }

    #[test]
    fn metrics_render_covers_every_family() {
        let metrics = CounterMetrics::default();
        metrics.requests.inc(&[("endpoint", "json")]);

        let out = metrics.render();
        assert!(out.contains("tally_http_requests_total{endpoint=\"json\"} 1"));
        assert!(out.contains("# TYPE tally_visits_recorded_total counter"));
        assert!(out.contains("# TYPE tally_visits_suppressed_total counter"));
        assert!(out.contains("# TYPE tally_store_errors_total counter"));
    }
}
