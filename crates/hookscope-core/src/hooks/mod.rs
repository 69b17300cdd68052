//! Hook keys, handlers and finalized hook tables
//!
//! A hook key is a zero-sized marker type implementing [`HookKey`]. Each key
//! belongs to exactly one [`HookSet`], which is what a
//! [`HooksContext`](crate::HooksContext) is parameterized over: a context only
//! hands out registrars for keys of its own set, so an unknown key is a
//! compile error rather than a runtime condition.
//!
//! # Examples
//!
//! ```rust
//! use hookscope_core::declare_hooks;
//! use hookscope_core::hooks::{HookKey, HookSet};
//!
//! declare_hooks! {
//!     /// Hooks fired by a page renderer
//!     pub RenderHooks {
//!         /// Fired once the page is flushed
//!         OnFlush(()) => "onFlush",
//!         /// Fired with the name of every rendered component
//!         OnComponent(str) => "onComponent",
//!     }
//! }
//!
//! assert_eq!(RenderHooks::KEYS, &["onFlush", "onComponent"]);
//! assert_eq!(OnComponent::NAME, "onComponent");
//! ```

mod handler;
pub(crate) mod registered;
mod result;

pub use handler::Handler;
pub use result::{HookResult, Hooks};

/// A declared set of hook keys.
///
/// The key list is informational; membership is enforced through
/// [`HookKey::Set`].
pub trait HookSet: 'static {
    /// Names of the keys belonging to this set, in declaration order
    const KEYS: &'static [&'static str];
}

/// A single hook key.
pub trait HookKey: 'static {
    /// The set this key belongs to
    type Set: HookSet;

    /// Argument handed to every handler, by reference
    type Args: ?Sized + 'static;

    /// Name of the key, used in logs and `Debug` output
    const NAME: &'static str;
}

/// Declare a [`HookSet`] together with its [`HookKey`] marker types.
///
/// Each key is written as `Type(Args) => "name"`. Handlers for the key receive
/// `&Args`; use `()` for hooks without arguments and a tuple for hooks with
/// several.
#[macro_export]
macro_rules! declare_hooks {
    (
        $(#[$set_meta:meta])*
        $vis:vis $set:ident {
            $(
                $(#[$key_meta:meta])*
                $key:ident ( $args:ty ) => $name:literal
            ),* $(,)?
        }
    ) => {
        $(#[$set_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $set;

        impl $crate::hooks::HookSet for $set {
            const KEYS: &'static [&'static str] = &[$($name),*];
        }

        $(
            $(#[$key_meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            $vis struct $key;

            impl $crate::hooks::HookKey for $key {
                type Set = $set;
                type Args = $args;
                const NAME: &'static str = $name;
            }
        )*
    };
}
