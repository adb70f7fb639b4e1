//! Conversation state storage

use dashmap::DashMap;

use crate::conversation::{ContactKey, ContactState, Turn};

/// Storage for per-contact conversation state
///
/// `apply` must run the closure with exclusive access to the contact's
/// state so concurrent messages from one contact cannot lose updates.
pub trait StateStore: Send + Sync {
    /// Run one step against the state for `key`, creating it if absent
    fn apply(&self, key: &ContactKey, step: &mut dyn FnMut(&mut ContactState) -> Turn) -> Turn;

    /// Snapshot of the state for `key`
    fn get(&self, key: &ContactKey) -> Option<ContactState>;

    /// Number of tracked contacts
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store; state lives as long as the server
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    states: DashMap<ContactKey, ContactState>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStateStore {
    fn apply(&self, key: &ContactKey, step: &mut dyn FnMut(&mut ContactState) -> Turn) -> Turn {
        // The entry guard holds the shard lock until the step returns
        let mut entry = self.states.entry(key.clone()).or_default();
        step(entry.value_mut())
    }

    fn get(&self, key: &ContactKey) -> Option<ContactState> {
        self.states.get(key).map(|state| state.value().clone())
    }

    fn len(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{Reply, Step};

    fn advance_to(step: Step) -> impl FnMut(&mut ContactState) -> Turn {
        move |state| {
            state.step = step;
            Turn {
                reply: Reply::prompt("ok"),
                step,
                sync: None,
            }
        }
    }

    #[test]
    fn test_apply_creates_state() {
        let store = InMemoryStateStore::new();
        let key = ContactKey::from_phone(Some("111"));
        assert!(store.is_empty());
        assert!(store.get(&key).is_none());

        store.apply(&key, &mut advance_to(Step::AwaitingTopic));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&key).unwrap().step, Step::AwaitingTopic);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = InMemoryStateStore::new();
        let a = ContactKey::from_phone(Some("111"));
        let b = ContactKey::from_phone(Some("222"));

        store.apply(&a, &mut advance_to(Step::Complete));
        store.apply(&b, &mut advance_to(Step::AwaitingTopic));

        assert_eq!(store.get(&a).unwrap().step, Step::Complete);
        assert_eq!(store.get(&b).unwrap().step, Step::AwaitingTopic);
    }

    #[test]
    fn test_concurrent_apply_does_not_lose_updates() {
        let store = std::sync::Arc::new(InMemoryStateStore::new());
        let key = ContactKey::from_phone(Some("333"));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = std::sync::Arc::clone(&store);
                let key = key.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        store.apply(&key, &mut |state: &mut ContactState| {
                            let count = state.name.as_deref().map_or(0, |n| n.len());
                            state.name = Some("x".repeat(count + 1));
                            Turn {
                                reply: Reply::prompt(""),
                                step: state.step,
                                sync: None,
                            }
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get(&key).unwrap().name.unwrap().len(), 800);
    }
}
