//! Finalized hook tables returned from `accept_hooks`

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use super::handler::Handler;
use super::registered::FinalizedHook;
use super::{HookKey, HookSet};

/// Everything a frame collected, detached from the context that produced it.
#[derive(Debug)]
pub struct HookResult<H: HookSet, M> {
    /// One callable per registered key
    pub hooks: Hooks<H>,
    /// Final state of the frame's meta
    pub meta: M,
}

/// Coalesced handlers of one frame, keyed by hook key.
///
/// Every key present maps to exactly one [`Handler`]. When several handlers
/// were registered under a key, that handler broadcasts to all of them in
/// registration order.
pub struct Hooks<H: HookSet> {
    entries: HashMap<TypeId, FinalizedHook>,
    _set: PhantomData<fn() -> H>,
}

impl<H: HookSet> Hooks<H> {
    pub(crate) fn from_finalized(finalized: impl IntoIterator<Item = (TypeId, FinalizedHook)>) -> Self {
        Self {
            entries: finalized.into_iter().collect(),
            _set: PhantomData,
        }
    }

    /// Get the handler registered for `K`, if any
    pub fn get<K>(&self) -> Option<Handler<K::Args>>
    where
        K: HookKey<Set = H>,
    {
        self.entries
            .get(&TypeId::of::<K>())
            .and_then(|entry| entry.handler.downcast_ref::<Handler<K::Args>>())
            .cloned()
    }

    /// Invoke the handler for `K` if one was registered.
    ///
    /// Returns whether a handler ran.
    pub fn call<K>(&self, args: &K::Args) -> bool
    where
        K: HookKey<Set = H>,
    {
        match self.get::<K>() {
            Some(handler) => {
                handler.call(args);
                true
            }
            None => false,
        }
    }

    /// Whether anything was registered for `K`
    pub fn contains<K>(&self) -> bool
    where
        K: HookKey<Set = H>,
    {
        self.entries.contains_key(&TypeId::of::<K>())
    }

    /// Number of handlers that were coalesced into `K`'s handler
    pub fn registrations<K>(&self) -> usize
    where
        K: HookKey<Set = H>,
    {
        self.entries
            .get(&TypeId::of::<K>())
            .map(|entry| entry.registrations)
            .unwrap_or(0)
    }

    /// Names of the registered keys, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.values().map(|entry| entry.name).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no key was registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H: HookSet> Default for Hooks<H> {
    fn default() -> Self {
        Self::from_finalized(Vec::new())
    }
}

impl<H: HookSet> fmt::Debug for Hooks<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self
            .entries
            .values()
            .map(|entry| (entry.name, entry.registrations))
            .collect();
        names.sort_unstable();
        f.debug_map().entries(names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::registered::{KeySlot, Slot};
    use std::cell::Cell;
    use std::rc::Rc;

    crate::declare_hooks! {
        TestHooks {
            Ping(()) => "ping",
            Greet(str) => "greet",
        }
    }

    fn finalize<K: HookKey>(handlers: Vec<Handler<K::Args>>) -> (TypeId, FinalizedHook) {
        let mut slot = KeySlot::<K>::new();
        for handler in handlers {
            slot.push(handler);
        }
        let finalized = Box::new(slot).finalize().expect("at least one handler");
        (TypeId::of::<K>(), finalized)
    }

    #[test]
    fn test_empty_hooks() {
        let hooks = Hooks::<TestHooks>::default();
        assert!(hooks.is_empty());
        assert!(!hooks.contains::<Ping>());
        assert!(hooks.get::<Greet>().is_none());
        assert!(!hooks.call::<Ping>(&()));
        assert_eq!(hooks.registrations::<Ping>(), 0);
    }

    #[test]
    fn test_get_and_call() {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let hooks = Hooks::<TestHooks>::from_finalized(vec![finalize::<Ping>(vec![Handler::new(
            move |_: &()| counter.set(counter.get() + 1),
        )])]);

        assert!(hooks.contains::<Ping>());
        assert!(!hooks.contains::<Greet>());
        assert!(hooks.call::<Ping>(&()));
        assert!(!hooks.call::<Greet>("nobody"));
        assert_eq!(count.get(), 1);
        assert_eq!(hooks.names(), vec!["ping"]);
    }

    #[test]
    fn test_registrations_count() {
        let hooks = Hooks::<TestHooks>::from_finalized(vec![
            finalize::<Greet>(vec![Handler::new(|_: &str| {}), Handler::new(|_: &str| {})]),
            finalize::<Ping>(vec![Handler::new(|_: &()| {})]),
        ]);

        assert_eq!(hooks.len(), 2);
        assert_eq!(hooks.registrations::<Greet>(), 2);
        assert_eq!(hooks.registrations::<Ping>(), 1);
        assert_eq!(hooks.names(), vec!["greet", "ping"]);
        assert_eq!(format!("{:?}", hooks), r#"{"greet": 2, "ping": 1}"#);
    }
}
