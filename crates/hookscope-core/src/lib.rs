//! hookscope core library
//!
//! Stack-scoped hook registration: code running inside
//! [`HooksContext::accept_hooks`] registers typed handlers and writes meta
//! without any parameter threading, and the caller gets everything back as a
//! [`HookResult`] once the closure returns.

pub mod context;
pub mod error;
pub mod hooks;
pub mod meta;

// Re-export commonly used types
pub use context::{build_hooks_context, HooksContext, Registrar};
pub use error::{HookScopeError, HookScopeResult};
pub use hooks::{Handler, HookKey, HookResult, HookSet, Hooks};
pub use meta::{MetaMap, MetaRef};
