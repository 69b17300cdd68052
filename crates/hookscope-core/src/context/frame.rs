//! Frames: the per-invocation scope of a hooks context

use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::rc::Rc;

use tracing::debug;

use crate::hooks::registered::{KeySlot, Slot};
use crate::hooks::{Handler, HookKey, HookResult, HookSet, Hooks};
use crate::meta::MetaRef;

/// One in-flight `accept_hooks` invocation
pub(crate) struct Frame<M> {
    hooks: HashMap<TypeId, Box<dyn Slot>>,
    meta: MetaRef<M>,
}

impl<M: Clone> Frame<M> {
    pub(crate) fn new(meta: M) -> Self {
        Self {
            hooks: HashMap::new(),
            meta: Rc::new(RefCell::new(meta)),
        }
    }

    pub(crate) fn meta(&self) -> MetaRef<M> {
        Rc::clone(&self.meta)
    }

    pub(crate) fn register<K: HookKey>(&mut self, handler: Handler<K::Args>) {
        match self.hooks.entry(TypeId::of::<K>()) {
            Entry::Vacant(entry) => {
                let mut slot = KeySlot::<K>::new();
                slot.push(handler);
                entry.insert(Box::new(slot));
            }
            Entry::Occupied(mut entry) => {
                // Slots are keyed by `TypeId::of::<K>()`, so this is a `KeySlot<K>`.
                let slot = entry.get_mut().as_any_mut().downcast_mut::<KeySlot<K>>();
                debug_assert!(slot.is_some(), "hook slot for {} has another key type", K::NAME);
                if let Some(slot) = slot {
                    slot.push(handler);
                }
            }
        }
    }

    /// Number of handlers registered so far, across all keys
    pub(crate) fn handler_count(&self) -> usize {
        self.hooks.values().map(|slot| slot.len()).sum()
    }

    /// Coalesce the frame's registrations and detach its meta.
    pub(crate) fn finalize<H: HookSet>(self) -> HookResult<H, M> {
        debug!(
            keys = self.hooks.len(),
            handlers = self.handler_count(),
            "finalizing hooks frame"
        );

        let finalized = self.hooks.into_iter().filter_map(|(id, slot)| {
            let name = slot.name();
            let entry = slot.finalize();
            if entry.is_none() {
                debug!(hook = name, "hook slot finalized without handlers");
            }
            entry.map(|entry| (id, entry))
        });
        let hooks = Hooks::from_finalized(finalized);

        // Handles returned by `hooks_meta` may outlive the frame.
        let meta = match Rc::try_unwrap(self.meta) {
            Ok(cell) => cell.into_inner(),
            Err(shared) => shared.borrow().clone(),
        };

        HookResult { hooks, meta }
    }
}
