//! Per-key registration storage inside a frame

use std::any::Any;
use std::marker::PhantomData;
use std::mem;

use super::handler::Handler;
use super::HookKey;

/// Handlers registered under one key, before coalescing
pub(crate) enum Registered<A: ?Sized> {
    Empty,
    One(Handler<A>),
    Many(Vec<Handler<A>>),
}

impl<A: ?Sized + 'static> Registered<A> {
    pub(crate) fn push(&mut self, handler: Handler<A>) {
        *self = match mem::replace(self, Registered::Empty) {
            Registered::Empty => Registered::One(handler),
            Registered::One(first) => Registered::Many(vec![first, handler]),
            Registered::Many(mut handlers) => {
                handlers.push(handler);
                Registered::Many(handlers)
            }
        };
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Registered::Empty => 0,
            Registered::One(_) => 1,
            Registered::Many(handlers) => handlers.len(),
        }
    }

    /// Collapse into a single callable; `None` when nothing was registered.
    pub(crate) fn coalesce(self) -> Option<Handler<A>> {
        match self {
            Registered::Empty => None,
            Registered::One(handler) => Some(handler),
            Registered::Many(handlers) => Some(Handler::broadcast(handlers)),
        }
    }
}

/// Type-erased view of a key's registrations, so a frame can hold slots for
/// keys with different argument types side by side.
pub(crate) trait Slot {
    fn name(&self) -> &'static str;

    fn len(&self) -> usize;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn finalize(self: Box<Self>) -> Option<FinalizedHook>;
}

/// The registrations for key `K`
pub(crate) struct KeySlot<K: HookKey> {
    registered: Registered<K::Args>,
    _key: PhantomData<fn() -> K>,
}

impl<K: HookKey> KeySlot<K> {
    pub(crate) fn new() -> Self {
        Self {
            registered: Registered::Empty,
            _key: PhantomData,
        }
    }

    pub(crate) fn push(&mut self, handler: Handler<K::Args>) {
        self.registered.push(handler);
    }
}

impl<K: HookKey> Slot for KeySlot<K> {
    fn name(&self) -> &'static str {
        K::NAME
    }

    fn len(&self) -> usize {
        self.registered.len()
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn finalize(self: Box<Self>) -> Option<FinalizedHook> {
        let registrations = self.registered.len();
        self.registered.coalesce().map(|handler| FinalizedHook {
            name: K::NAME,
            registrations,
            handler: Box::new(handler),
        })
    }
}

/// A coalesced handler, erased to `Box<dyn Any>` holding a `Handler<K::Args>`
pub(crate) struct FinalizedHook {
    pub(crate) name: &'static str,
    pub(crate) registrations: usize,
    pub(crate) handler: Box<dyn Any>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> Handler<str> {
        let log = Rc::clone(log);
        Handler::new(move |arg: &str| log.borrow_mut().push(format!("{}:{}", tag, arg)))
    }

    #[test]
    fn test_push_transitions() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registered: Registered<str> = Registered::Empty;
        assert_eq!(registered.len(), 0);

        registered.push(recording(&log, "a"));
        assert!(matches!(registered, Registered::One(_)));

        registered.push(recording(&log, "b"));
        assert!(matches!(registered, Registered::Many(ref v) if v.len() == 2));

        registered.push(recording(&log, "c"));
        assert_eq!(registered.len(), 3);
    }

    #[test]
    fn test_coalesce_empty() {
        let registered: Registered<str> = Registered::Empty;
        assert!(registered.coalesce().is_none());
    }

    #[test]
    fn test_coalesce_one_is_passthrough() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let handler = recording(&log, "a");
        let mut registered = Registered::Empty;
        registered.push(handler.clone());

        let coalesced = registered.coalesce().expect("one handler");
        assert!(coalesced.ptr_eq(&handler));
    }

    #[test]
    fn test_coalesce_many_broadcasts_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registered = Registered::Empty;
        registered.push(recording(&log, "a"));
        registered.push(recording(&log, "b"));
        registered.push(recording(&log, "c"));

        registered.coalesce().expect("three handlers").call("x");
        assert_eq!(*log.borrow(), vec!["a:x", "b:x", "c:x"]);
    }
}
