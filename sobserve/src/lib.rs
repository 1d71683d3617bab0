//! Production-friendly observability hooks for streaming and rotation.
//!
//! ```rust
//! use sobserve::{MetricsObservabilityHooks, SafeStreamHooks, TracingObservabilityHooks};
//!
//! let _stream_hooks = SafeStreamHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeRotationHooks, SafeStreamHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeRotationHooks, SafeStreamHooks, TracingObservabilityHooks,
    };
}
