use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    CounterStore, FileCounterStore, NoopRotationHooks, RotationHooks, RotatorError,
    RotatorErrorKind,
};

/// Hands out items in strict cyclic order, sharing its position with every
/// other rotator that uses the same [`CounterStore`].
///
/// `next` blocks while another caller holds the store's critical section.
pub struct Rotator<T> {
    items: Vec<T>,
    store: Box<dyn CounterStore>,
    hooks: Arc<dyn RotationHooks>,
}

impl<T> Rotator<T> {
    /// Fails with `Configuration` on an empty list without touching `store`.
    pub fn new(items: Vec<T>, store: impl CounterStore + 'static) -> Result<Self, RotatorError> {
        if items.is_empty() {
            return Err(RotatorError::configuration(
                "rotator requires at least one item",
            ));
        }

        Ok(Self {
            items,
            store: Box::new(store),
            hooks: Arc::new(NoopRotationHooks),
        })
    }

    pub fn with_state_file(items: Vec<T>, path: impl Into<PathBuf>) -> Result<Self, RotatorError> {
        Self::new(items, FileCounterStore::new(path))
    }

    /// Rotator over the well-known shared state file in the temp directory.
    pub fn with_default_state(items: Vec<T>) -> Result<Self, RotatorError> {
        Self::new(items, FileCounterStore::in_temp_dir())
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn RotationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn next(&self) -> Result<&T, RotatorError> {
        let index = self.next_index()?;
        self.items.get(index).ok_or_else(|| {
            RotatorError::state_unavailable(format!(
                "counter returned index {index} for {} items",
                self.items.len()
            ))
        })
    }

    /// Like [`Rotator::next`], returning the position instead of the item.
    pub fn next_index(&self) -> Result<usize, RotatorError> {
        match self.store.advance(self.items.len()) {
            Ok(index) => {
                self.hooks.on_selected(index, self.items.len());
                Ok(index)
            }
            Err(error) => {
                if error.kind == RotatorErrorKind::StateUnavailable {
                    self.hooks.on_state_unavailable(&error);
                }
                Err(error)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Rotator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rotator")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::Rotator;
    use crate::{
        CounterStore, InMemoryCounterStore, RotationHooks, RotatorError, RotatorErrorKind,
    };

    #[derive(Debug, Default)]
    struct CountingStore {
        calls: Arc<AtomicUsize>,
    }

    impl CounterStore for CountingStore {
        fn advance(&self, _modulus: usize) -> Result<usize, RotatorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        }
    }

    struct FailingStore;

    impl CounterStore for FailingStore {
        fn advance(&self, _modulus: usize) -> Result<usize, RotatorError> {
            Err(RotatorError::state_unavailable("disk gone"))
        }
    }

    #[derive(Default)]
    struct RecordingHooks {
        selected: Mutex<Vec<(usize, usize)>>,
        failures: AtomicUsize,
    }

    impl RotationHooks for RecordingHooks {
        fn on_selected(&self, index: usize, item_count: usize) {
            self.selected
                .lock()
                .expect("selected lock")
                .push((index, item_count));
        }

        fn on_state_unavailable(&self, _error: &RotatorError) {
            self.failures.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn empty_list_fails_before_touching_store() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = CountingStore {
            calls: calls.clone(),
        };

        let error = Rotator::<&str>::new(Vec::new(), store).expect_err("empty list should fail");

        assert_eq!(error.kind, RotatorErrorKind::Configuration);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn two_full_rotations_in_order() {
        let rotator =
            Rotator::new(vec!["openai", "groq", "cerebras"], InMemoryCounterStore::new())
                .expect("rotator");

        let picks = (0..6)
            .map(|_| *rotator.next().expect("next"))
            .collect::<Vec<_>>();

        assert_eq!(
            picks,
            vec!["openai", "groq", "cerebras", "openai", "groq", "cerebras"]
        );
    }

    #[test]
    fn hooks_see_selection_and_state_failures() {
        let hooks = Arc::new(RecordingHooks::default());
        let rotator = Rotator::new(vec!['a', 'b'], InMemoryCounterStore::new())
            .expect("rotator")
            .with_hooks(hooks.clone());
        rotator.next().expect("next");
        rotator.next().expect("next");

        let failing = Rotator::new(vec!['a'], FailingStore)
            .expect("rotator")
            .with_hooks(hooks.clone());
        let error = failing.next().expect_err("store should fail");

        assert_eq!(error.kind, RotatorErrorKind::StateUnavailable);
        assert_eq!(
            *hooks.selected.lock().expect("selected lock"),
            vec![(0, 2), (1, 2)]
        );
        assert_eq!(hooks.failures.load(Ordering::SeqCst), 1);
    }
}
