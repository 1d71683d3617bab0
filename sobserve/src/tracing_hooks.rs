//! Tracing-based observability hooks for streaming calls and rotation.
//!
//! ```rust
//! use sobserve::TracingObservabilityHooks;
//! use srotator::RotationHooks;
//!
//! fn accepts_rotation_hooks(_hooks: &dyn RotationHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_rotation_hooks(&hooks);
//! ```

use std::time::Duration;

use sprovider::{ProviderError, ProviderStreamHooks};
use srotator::{RotationHooks, RotatorError};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderStreamHooks for TracingObservabilityHooks {
    fn on_stream_start(&self, provider: &str, model: &str) {
        tracing::info!(phase = "stream", event = "start", provider, model);
    }

    fn on_stream_success(&self, provider: &str, deltas: usize, elapsed: Duration) {
        tracing::info!(
            phase = "stream",
            event = "success",
            provider,
            deltas = deltas as u64,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_stream_failure(&self, provider: &str, error: &ProviderError, elapsed: Duration) {
        let category = error.category().map(|category| category.as_str());
        tracing::error!(
            phase = "stream",
            event = "failure",
            provider,
            error_kind = ?error.kind(),
            category,
            status = error.status(),
            elapsed_ms = elapsed.as_millis() as u64,
            error = %error
        );
    }
}

impl RotationHooks for TracingObservabilityHooks {
    fn on_selected(&self, index: usize, item_count: usize) {
        tracing::debug!(
            phase = "rotation",
            event = "selected",
            index = index as u64,
            item_count = item_count as u64
        );
    }

    fn on_state_unavailable(&self, error: &RotatorError) {
        tracing::error!(
            phase = "rotation",
            event = "state_unavailable",
            error_kind = ?error.kind,
            error = %error
        );
    }
}
