//! Shared application state.
//!
//! Holds the parsed configuration, the visit sink, and the metrics
//! registry behind one cheap-to-clone handle.

use std::sync::Arc;

use tally_core::store::CounterStore;

use crate::config::CounterConfig;
use crate::obs::metrics::CounterMetrics;
use crate::sink::{FileSink, VisitSink};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: CounterConfig,
    sink: Arc<dyn VisitSink>,
    metrics: CounterMetrics,
}

impl AppState {
    /// Build state around the production file-backed sink.
    pub fn new(cfg: CounterConfig) -> Self {
        let store = CounterStore::new(
            &cfg.lock_filename,
            &cfg.count_filename,
            &cfg.log_dirname,
        );
        Self::with_sink(cfg, Arc::new(FileSink::new(store)))
    }

    /// Build state around an arbitrary sink. Tests inject counting fakes
    /// here to observe suppression behavior without filesystem traffic.
    pub fn with_sink(cfg: CounterConfig, sink: Arc<dyn VisitSink>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                sink,
                metrics: CounterMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &CounterConfig {
        &self.inner.cfg
    }

    pub fn sink(&self) -> &dyn VisitSink {
        self.inner.sink.as_ref()
    }

    pub fn metrics(&self) -> &CounterMetrics {
        &self.inner.metrics
    }
}
