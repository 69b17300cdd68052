//! Handler implementation

use std::fmt;
use std::rc::Rc;

/// A registered hook callback.
///
/// Handlers receive the hook's argument by reference and return nothing, so a
/// hook can only ever be a command. Cloning a handler is cheap and keeps the
/// same underlying callback.
pub struct Handler<A: ?Sized> {
    callback: Rc<dyn Fn(&A)>,
}

impl<A: ?Sized> Handler<A> {
    /// Create a new handler
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Invoke the handler
    pub fn call(&self, args: &A) {
        (self.callback)(args)
    }

    /// Whether both handlers wrap the same callback
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }

    /// Build a handler that calls every handler in `handlers` in order.
    pub(crate) fn broadcast(handlers: Vec<Handler<A>>) -> Self
    where
        A: 'static,
    {
        Self::new(move |args: &A| {
            for handler in &handlers {
                handler.call(args);
            }
        })
    }
}

impl<A: ?Sized> Clone for Handler<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<A: ?Sized> fmt::Debug for Handler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("callback", &Rc::as_ptr(&self.callback))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_handler_call() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let handler: Handler<str> = Handler::new(move |name: &str| {
            sink.borrow_mut().push(name.to_string());
        });

        handler.call("foo");
        handler.call("bar");
        assert_eq!(*seen.borrow(), vec!["foo".to_string(), "bar".to_string()]);
    }

    #[test]
    fn test_handler_clone_shares_callback() {
        let handler: Handler<()> = Handler::new(|_| {});
        let cloned = handler.clone();
        assert!(handler.ptr_eq(&cloned));

        let other: Handler<()> = Handler::new(|_| {});
        assert!(!handler.ptr_eq(&other));
    }

    #[test]
    fn test_broadcast_keeps_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let handlers: Vec<Handler<u32>> = (0..3)
            .map(|i| {
                let sink = Rc::clone(&seen);
                Handler::new(move |n: &u32| sink.borrow_mut().push(i * 10 + n))
            })
            .collect();

        Handler::broadcast(handlers).call(&1);
        assert_eq!(*seen.borrow(), vec![1, 11, 21]);
    }

    #[test]
    fn test_broadcast_empty() {
        let handler: Handler<u32> = Handler::broadcast(Vec::new());
        handler.call(&7);
    }
}
