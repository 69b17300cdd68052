//! Registration functions bound to one hook key

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use tracing::{debug, trace};

use super::frame::Frame;
use crate::hooks::{Handler, HookKey};

/// Registers handlers for `K` into whichever frame is current when called.
///
/// Outside of any `accept_hooks` invocation registering is a no-op, so
/// library code can register unconditionally.
pub struct Registrar<K: HookKey, M> {
    stack: Rc<RefCell<Vec<Frame<M>>>>,
    _key: PhantomData<fn() -> K>,
}

impl<K: HookKey, M: Clone> Registrar<K, M> {
    pub(crate) fn new(stack: Rc<RefCell<Vec<Frame<M>>>>) -> Self {
        Self {
            stack,
            _key: PhantomData,
        }
    }

    /// Register a callback
    pub fn register<F>(&self, callback: F)
    where
        F: Fn(&K::Args) + 'static,
    {
        self.register_handler(Handler::new(callback));
    }

    /// Register an existing handler
    pub fn register_handler(&self, handler: Handler<K::Args>) {
        let mut frames = self.stack.borrow_mut();
        let depth = frames.len();
        match frames.last_mut() {
            Some(frame) => {
                frame.register::<K>(handler);
                trace!(hook = K::NAME, depth, "registered hook handler");
            }
            None => debug!(hook = K::NAME, "no active hooks frame, registration ignored"),
        }
    }

    /// Name of the bound key
    pub fn key(&self) -> &'static str {
        K::NAME
    }
}

impl<K: HookKey, M> Clone for Registrar<K, M> {
    fn clone(&self) -> Self {
        Self {
            stack: Rc::clone(&self.stack),
            _key: PhantomData,
        }
    }
}

impl<K: HookKey, M> fmt::Debug for Registrar<K, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registrar").field("key", &K::NAME).finish()
    }
}
