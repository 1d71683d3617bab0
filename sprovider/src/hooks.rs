//! Operational hook contract for streaming calls.
//!
//! ```rust
//! use sprovider::{NoopStreamHooks, ProviderStreamHooks};
//!
//! fn accepts_hooks(_hooks: &dyn ProviderStreamHooks) {}
//!
//! accepts_hooks(&NoopStreamHooks);
//! ```

use std::time::Duration;

use crate::ProviderError;

pub trait ProviderStreamHooks: Send + Sync {
    fn on_stream_start(&self, _provider: &str, _model: &str) {}

    fn on_stream_success(&self, _provider: &str, _deltas: usize, _elapsed: Duration) {}

    fn on_stream_failure(&self, _provider: &str, _error: &ProviderError, _elapsed: Duration) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStreamHooks;

impl ProviderStreamHooks for NoopStreamHooks {}
