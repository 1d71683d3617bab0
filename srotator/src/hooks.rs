//! Operational hook contract for rotation.
//!
//! ```rust
//! use srotator::{NoopRotationHooks, RotationHooks};
//!
//! fn accepts_hooks(_hooks: &dyn RotationHooks) {}
//!
//! accepts_hooks(&NoopRotationHooks);
//! ```

use crate::RotatorError;

pub trait RotationHooks: Send + Sync {
    fn on_selected(&self, _index: usize, _item_count: usize) {}

    fn on_state_unavailable(&self, _error: &RotatorError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRotationHooks;

impl RotationHooks for NoopRotationHooks {}
