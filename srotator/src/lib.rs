//! Round-robin selection whose position survives restarts and is shared by
//! every process pointing at the same state file.
//!
//! ```rust
//! use srotator::{InMemoryCounterStore, Rotator};
//!
//! let rotator = Rotator::new(vec!["openai", "groq"], InMemoryCounterStore::new())
//!     .expect("non-empty list");
//!
//! assert_eq!(*rotator.next().expect("next"), "openai");
//! assert_eq!(*rotator.next().expect("next"), "groq");
//! assert_eq!(*rotator.next().expect("next"), "openai");
//! ```

mod error;
mod file_store;
mod hooks;
mod rotator;
mod store;

pub use error::{RotatorError, RotatorErrorKind};
pub use file_store::{DEFAULT_STATE_FILE_NAME, FileCounterStore};
pub use hooks::{NoopRotationHooks, RotationHooks};
pub use rotator::Rotator;
pub use store::{CounterStore, InMemoryCounterStore};

#[cfg(test)]
pub(crate) mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    pub(crate) fn temp_dir(prefix: &str) -> std::path::PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!(
            "srotator-{prefix}-{}-{unique}",
            std::process::id()
        ))
    }
}
