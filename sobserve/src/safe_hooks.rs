use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use sprovider::{ProviderError, ProviderStreamHooks};
use srotator::{RotationHooks, RotatorError};

/// Swallows panics raised by the wrapped stream hooks.
pub struct SafeStreamHooks<H> {
    inner: H,
}

impl<H> SafeStreamHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ProviderStreamHooks for SafeStreamHooks<H>
where
    H: ProviderStreamHooks,
{
    fn on_stream_start(&self, provider: &str, model: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_stream_start(provider, model)
        }));
    }

    fn on_stream_success(&self, provider: &str, deltas: usize, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_stream_success(provider, deltas, elapsed)
        }));
    }

    fn on_stream_failure(&self, provider: &str, error: &ProviderError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_stream_failure(provider, error, elapsed)
        }));
    }
}

/// Swallows panics raised by the wrapped rotation hooks.
pub struct SafeRotationHooks<H> {
    inner: H,
}

impl<H> SafeRotationHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> RotationHooks for SafeRotationHooks<H>
where
    H: RotationHooks,
{
    fn on_selected(&self, index: usize, item_count: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_selected(index, item_count)
        }));
    }

    fn on_state_unavailable(&self, error: &RotatorError) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_state_unavailable(error)));
    }
}
