use crate::pages::Pages;
use metrics_exporter_prometheus::PrometheusHandle;
use spamham_classifiers::PredictionHandler;
use std::sync::Arc;

/// Shared application state
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Loaded vectorizer and classifiers
    pub handler: PredictionHandler,

    /// Compiled HTML templates
    pub pages: Arc<Pages>,

    /// Prometheus exporter, absent when no recorder is installed
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(handler: PredictionHandler) -> anyhow::Result<Self> {
        Ok(Self {
            handler,
            pages: Arc::new(Pages::new()?),
            metrics_handle: None,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}
