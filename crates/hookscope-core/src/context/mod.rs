//! The hooks context: a stack of frames scoped to `accept_hooks` calls
//!
//! Registrations and meta writes made anywhere inside the closure passed to
//! [`HooksContext::accept_hooks`], however deeply nested, land in that call's
//! frame. Nested `accept_hooks` calls get their own frame, popped before
//! control returns to the caller, so frames never bleed into each other.
//!
//! # Examples
//!
//! ```rust
//! use hookscope_core::{build_hooks_context, declare_hooks, HookResult, MetaMap};
//!
//! declare_hooks! {
//!     pub DemoHooks {
//!         OnA(()) => "onA",
//!         OnB(str) => "onB",
//!     }
//! }
//!
//! let context = build_hooks_context::<DemoHooks, MetaMap>();
//! let on_b = context.hook::<OnB>();
//!
//! let (value, HookResult { hooks, meta }) = context.accept_hooks(|| {
//!     on_b.register(|name| println!("B:{}", name));
//!     context
//!         .update_meta(|meta| meta.set("seen", true))
//!         .and_then(|set| set)
//!         .unwrap();
//!     42
//! });
//!
//! assert_eq!(value, 42);
//! assert_eq!(meta.get::<bool>("seen").unwrap(), Some(true));
//! assert!(hooks.call::<OnB>("foo"));
//! assert!(!hooks.call::<OnA>(&()));
//! ```

mod frame;
mod guard;
mod registrar;

pub use registrar::Registrar;

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use tracing::{debug, error, trace};

use crate::error::{HookScopeError, HookScopeResult};
use crate::hooks::{HookKey, HookResult, HookSet};
use crate::meta::{MetaMap, MetaRef};
use frame::Frame;
use guard::FrameGuard;

/// Create a new, independent hooks context for the key set `H` and meta
/// shape `M`.
pub fn build_hooks_context<H, M>() -> HooksContext<H, M>
where
    H: HookSet,
    M: Clone + Default + 'static,
{
    HooksContext::new()
}

/// A stack of hook frames.
///
/// The context is `!Send`: its stack belongs to one thread. Use a
/// `thread_local!` when a context needs to be reachable from free functions.
/// Clones share the same stack.
pub struct HooksContext<H: HookSet, M = MetaMap> {
    stack: Rc<RefCell<Vec<Frame<M>>>>,
    label: Rc<str>,
    _set: PhantomData<fn() -> H>,
}

impl<H, M> HooksContext<H, M>
where
    H: HookSet,
    M: Clone + Default + 'static,
{
    /// Create a context labelled after its hook set
    pub fn new() -> Self {
        let label = std::any::type_name::<H>();
        Self::named(label.rsplit("::").next().unwrap_or(label))
    }

    /// Create a context with a label used in log output
    pub fn named(label: impl Into<String>) -> Self {
        Self {
            stack: Rc::new(RefCell::new(Vec::new())),
            label: Rc::from(label.into()),
            _set: PhantomData,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run `f` in a fresh frame with empty meta.
    ///
    /// Returns `f`'s value and everything registered while it ran. If the
    /// frame is gone when `f` returns, which only happens when a guard for it
    /// was leaked with `mem::forget`, the result is empty and an error is
    /// logged.
    pub fn accept_hooks<T>(&self, f: impl FnOnce() -> T) -> (T, HookResult<H, M>) {
        self.accept_hooks_with(f, M::default())
    }

    /// Run `f` in a fresh frame whose meta starts as `meta`.
    pub fn accept_hooks_with<T>(&self, f: impl FnOnce() -> T, meta: M) -> (T, HookResult<H, M>) {
        let (value, frame) = self.run(f, meta);
        (value, frame.finalize())
    }

    /// Like [`accept_hooks`](Self::accept_hooks) for fallible closures.
    ///
    /// On `Err` the frame is discarded along with its registrations.
    pub fn try_accept_hooks<T, E>(
        &self,
        f: impl FnOnce() -> Result<T, E>,
    ) -> Result<(T, HookResult<H, M>), E> {
        self.try_accept_hooks_with(f, M::default())
    }

    /// Like [`accept_hooks_with`](Self::accept_hooks_with) for fallible
    /// closures.
    pub fn try_accept_hooks_with<T, E>(
        &self,
        f: impl FnOnce() -> Result<T, E>,
        meta: M,
    ) -> Result<(T, HookResult<H, M>), E> {
        let (result, frame) = self.run(f, meta);
        match result {
            Ok(value) => Ok((value, frame.finalize())),
            Err(err) => {
                debug!(
                    context = %self.label,
                    handlers = frame.handler_count(),
                    "closure failed, discarding hooks frame"
                );
                Err(err)
            }
        }
    }

    /// Registration function for the key `K`
    pub fn hook<K>(&self) -> Registrar<K, M>
    where
        K: HookKey<Set = H>,
    {
        Registrar::new(Rc::clone(&self.stack))
    }

    /// Live meta of the current frame.
    ///
    /// With no active frame this is a detached default value; writes to it are
    /// lost.
    pub fn hooks_meta(&self) -> MetaRef<M> {
        self.stack
            .borrow()
            .last()
            .map(|frame| frame.meta())
            .unwrap_or_else(|| Rc::new(RefCell::new(M::default())))
    }

    /// Borrow the current frame's meta mutably for the duration of `f`.
    ///
    /// Fails with [`HookScopeError::MetaBusy`] instead of running `f` when the
    /// meta is already borrowed, such as from a helper called inside an
    /// enclosing `update_meta`, or through a handle from
    /// [`hooks_meta`](Self::hooks_meta) that is still borrowed.
    pub fn update_meta<R>(&self, f: impl FnOnce(&mut M) -> R) -> HookScopeResult<R> {
        let meta = self.hooks_meta();
        let mut meta = meta.try_borrow_mut().map_err(|_| {
            debug!(context = %self.label, "meta already borrowed, update skipped");
            HookScopeError::meta_busy(self.label.as_ref())
        })?;
        Ok(f(&mut meta))
    }

    /// Number of `accept_hooks` calls currently in flight
    pub fn depth(&self) -> usize {
        self.stack.borrow().len()
    }

    /// Whether a frame is active
    pub fn is_active(&self) -> bool {
        self.depth() > 0
    }

    fn run<T>(&self, f: impl FnOnce() -> T, meta: M) -> (T, Frame<M>) {
        let guard = FrameGuard::push(&self.stack, Frame::new(meta));
        let depth = guard.depth();
        trace!(context = %self.label, depth, "pushed hooks frame");

        let value = f();

        let frame = guard.pop().unwrap_or_else(|| {
            error!(
                context = %self.label,
                depth,
                "hooks frame missing on exit, registrations lost"
            );
            Frame::new(M::default())
        });
        trace!(context = %self.label, depth = depth - 1, "popped hooks frame");

        (value, frame)
    }
}

impl<H, M> Default for HooksContext<H, M>
where
    H: HookSet,
    M: Clone + Default + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HookSet, M> Clone for HooksContext<H, M> {
    fn clone(&self) -> Self {
        Self {
            stack: Rc::clone(&self.stack),
            label: Rc::clone(&self.label),
            _set: PhantomData,
        }
    }
}

impl<H: HookSet, M> fmt::Debug for HooksContext<H, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HooksContext")
            .field("label", &self.label)
            .field("keys", &H::KEYS)
            .field("depth", &self.stack.try_borrow().map(|s| s.len()).ok())
            .finish()
    }
}
