//! Metrics-based observability hooks for streaming calls and rotation.
//!
//! ```rust
//! use sobserve::MetricsObservabilityHooks;
//! use sprovider::ProviderStreamHooks;
//!
//! fn accepts_stream_hooks(_hooks: &dyn ProviderStreamHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_stream_hooks(&hooks);
//! ```

use std::time::Duration;

use sprovider::{ProviderError, ProviderStreamHooks};
use srotator::{RotationHooks, RotatorError};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderStreamHooks for MetricsObservabilityHooks {
    fn on_stream_start(&self, provider: &str, model: &str) {
        metrics::counter!(
            "switchyard_stream_start_total",
            "provider" => provider.to_string(),
            "model" => model.to_string()
        )
        .increment(1);
    }

    fn on_stream_success(&self, provider: &str, deltas: usize, elapsed: Duration) {
        metrics::counter!(
            "switchyard_stream_success_total",
            "provider" => provider.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "switchyard_stream_deltas",
            "provider" => provider.to_string()
        )
        .record(deltas as f64);
        metrics::histogram!(
            "switchyard_stream_duration_seconds",
            "provider" => provider.to_string()
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_stream_failure(&self, provider: &str, error: &ProviderError, _elapsed: Duration) {
        let category = error
            .category()
            .map(|category| category.as_str())
            .unwrap_or("none");

        metrics::counter!(
            "switchyard_stream_failure_total",
            "provider" => provider.to_string(),
            "error_kind" => format!("{:?}", error.kind()),
            "category" => category
        )
        .increment(1);
    }
}

impl RotationHooks for MetricsObservabilityHooks {
    fn on_selected(&self, index: usize, _item_count: usize) {
        metrics::counter!(
            "switchyard_rotation_selected_total",
            "index" => index.to_string()
        )
        .increment(1);
    }

    fn on_state_unavailable(&self, error: &RotatorError) {
        metrics::counter!(
            "switchyard_rotation_state_unavailable_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }
}
