//! Counter store contract and the in-process implementation.

use std::sync::Mutex;

use crate::RotatorError;

/// A shared cyclic counter.
///
/// `advance` runs as one critical section: it reads the stored index, maps it
/// into `0..modulus`, persists the successor and returns the selected value.
/// No two concurrent callers may observe the same stored value.
pub trait CounterStore: Send + Sync {
    fn advance(&self, modulus: usize) -> Result<usize, RotatorError>;
}

/// Counter shared between threads of one process.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    next: Mutex<usize>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(index: usize) -> Self {
        Self {
            next: Mutex::new(index),
        }
    }
}

impl CounterStore for InMemoryCounterStore {
    fn advance(&self, modulus: usize) -> Result<usize, RotatorError> {
        if modulus == 0 {
            return Err(RotatorError::configuration("cannot rotate over zero items"));
        }

        let mut next = self
            .next
            .lock()
            .map_err(|_| RotatorError::state_unavailable("rotation counter lock poisoned"))?;
        let selected = *next % modulus;
        *next = (selected + 1) % modulus;

        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::{CounterStore, InMemoryCounterStore};
    use crate::RotatorErrorKind;

    #[test]
    fn advances_cyclically() {
        let store = InMemoryCounterStore::new();
        let picks = (0..7)
            .map(|_| store.advance(3).expect("advance"))
            .collect::<Vec<_>>();

        assert_eq!(picks, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn out_of_range_start_wraps() {
        let store = InMemoryCounterStore::starting_at(5);

        assert_eq!(store.advance(2).expect("advance"), 1);
        assert_eq!(store.advance(2).expect("advance"), 0);
    }

    #[test]
    fn zero_modulus_is_configuration_error() {
        let error = InMemoryCounterStore::new()
            .advance(0)
            .expect_err("zero modulus should fail");
        assert_eq!(error.kind, RotatorErrorKind::Configuration);
    }
}
