// store.rs — SessionStore: the single point of truth.
//
// Exactly one SessionState value lives here at a time. Mutation happens
// only through replace(): the updater receives the previous snapshot and
// returns the next one, the store stamps last_updated, swaps the snapshot
// wholesale, and delivers it to every observer. Mutations are applied
// sequentially on the calling thread — one completes before the next is
// considered, so there is no partial-state hazard between the two actors.

use tracing::warn;

use crate::error::StoreError;
use crate::session::SessionState;

/// Receives every new state snapshot after a successful mutation.
///
/// Errors are logged and dropped — an observer can never fail a mutation.
pub trait StateObserver: Send {
    fn state_changed(&mut self, state: &SessionState) -> Result<(), StoreError>;
}

/// Owns the current [`SessionState`] and dispatches snapshots to observers.
pub struct SessionStore {
    state: SessionState,
    observers: Vec<Box<dyn StateObserver>>,
}

impl SessionStore {
    /// Create a store holding the given initial state.
    ///
    /// Observers are not notified of the initial state — only changes
    /// after the session has initialized are published.
    pub fn new(initial: SessionState) -> Self {
        Self {
            state: initial,
            observers: Vec::new(),
        }
    }

    /// Register an observer for future state changes.
    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    /// Current snapshot.
    pub fn get(&self) -> SessionState {
        self.state.clone()
    }

    /// Apply a mutation: the updater maps the previous state to the next
    /// one, last_updated is refreshed, and the new snapshot is published
    /// to all observers. Returns the new state.
    pub fn replace(&mut self, updater: impl FnOnce(SessionState) -> SessionState) -> SessionState {
        let mut next = updater(self.state.clone());
        next.last_updated = chrono::Utc::now();
        self.state = next;
        self.publish();
        self.state.clone()
    }

    /// Re-deliver the current snapshot to all observers without mutating
    /// anything. Used when presentation state changed but the document did
    /// not (e.g., a cancelled commit confirmation must still re-render).
    pub fn publish(&mut self) {
        for observer in &mut self.observers {
            if let Err(e) = observer.state_changed(&self.state) {
                warn!("state observer error: {}", e);
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Counts deliveries and remembers the last observed objective count.
    struct Probe {
        deliveries: Arc<Mutex<Vec<usize>>>,
    }

    impl StateObserver for Probe {
        fn state_changed(&mut self, state: &SessionState) -> Result<(), StoreError> {
            self.deliveries.lock().unwrap().push(state.objectives.len());
            Ok(())
        }
    }

    struct FailingObserver;

    impl StateObserver for FailingObserver {
        fn state_changed(&mut self, _state: &SessionState) -> Result<(), StoreError> {
            Err(StoreError::Observer("sink unavailable".to_string()))
        }
    }

    fn probe() -> (Probe, Arc<Mutex<Vec<usize>>>) {
        let deliveries = Arc::new(Mutex::new(Vec::new()));
        (
            Probe {
                deliveries: deliveries.clone(),
            },
            deliveries,
        )
    }

    #[test]
    fn replace_applies_updater_to_previous_state() {
        let mut store = SessionStore::new(SessionState::sample());
        let next = store.replace(|mut s| {
            s.objectives.retain(|o| o.id != "2");
            s
        });
        assert_eq!(next.objectives.len(), 1);
        assert_eq!(store.get().objectives.len(), 1);
    }

    #[test]
    fn replace_refreshes_last_updated() {
        let mut store = SessionStore::new(SessionState::default());
        let before = store.get().last_updated;
        let next = store.replace(|s| s);
        assert!(next.last_updated >= before);
    }

    #[test]
    fn observers_receive_each_replace_but_not_initial_state() {
        let (observer, deliveries) = probe();
        let mut store = SessionStore::new(SessionState::default());
        store.subscribe(Box::new(observer));
        assert!(deliveries.lock().unwrap().is_empty());

        store.replace(|s| s);
        store.replace(|s| s);
        assert_eq!(deliveries.lock().unwrap().len(), 2);
    }

    #[test]
    fn publish_redelivers_without_mutation() {
        let (observer, deliveries) = probe();
        let mut store = SessionStore::new(SessionState::sample());
        store.subscribe(Box::new(observer));

        let before = store.get();
        store.publish();

        assert_eq!(store.get(), before);
        assert_eq!(deliveries.lock().unwrap().as_slice(), &[2]);
    }

    #[test]
    fn failing_observer_does_not_block_mutation_or_other_observers() {
        let (observer, deliveries) = probe();
        let mut store = SessionStore::new(SessionState::default());
        store.subscribe(Box::new(FailingObserver));
        store.subscribe(Box::new(observer));

        let next = store.replace(|mut s| {
            s.current_period = "Q2 2026".to_string();
            s
        });

        assert_eq!(next.current_period, "Q2 2026");
        assert_eq!(deliveries.lock().unwrap().len(), 1);
    }
}
