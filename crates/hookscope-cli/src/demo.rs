//! The demo program: hooks registered from helper functions
//!
//! The demo context lives in a thread-local, so the helpers below register
//! handlers without being handed the context or the caller's state.

use std::cell::RefCell;
use std::rc::Rc;

use hookscope_core::hooks::HookSet;
use hookscope_core::{declare_hooks, HookResult, HookScopeResult, HooksContext, MetaMap};
use tracing::info;

declare_hooks! {
    /// Hooks exposed by the demo program
    pub DemoHooks {
        /// Fired without arguments
        OnA(()) => "onA",
        /// Fired with a name
        OnB(str) => "onB",
    }
}

thread_local! {
    static DEMO_CONTEXT: HooksContext<DemoHooks, MetaMap> = HooksContext::named("demo");
}

/// Get the thread-local demo context
pub fn demo_context() -> HooksContext<DemoHooks, MetaMap> {
    DEMO_CONTEXT.with(|context| context.clone())
}

/// Lines written by the demo and its handlers, in order
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Rc<RefCell<Vec<String>>>,
}

impl Transcript {
    pub fn line(&self, line: impl Into<String>) {
        self.lines.borrow_mut().push(line.into());
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

/// Settings for one demo run
#[derive(Debug, Clone)]
pub struct DemoSettings {
    pub name: String,
    pub meta: MetaMap,
}

fn register_a(transcript: &Transcript) {
    let transcript = transcript.clone();
    demo_context()
        .hook::<OnA>()
        .register(move |_| transcript.line("A"));
}

fn register_b(transcript: &Transcript) {
    let transcript = transcript.clone();
    demo_context()
        .hook::<OnB>()
        .register(move |name| transcript.line(format!("B:{}", name)));
}

fn bump_x() -> HookScopeResult<i64> {
    demo_context()
        .update_meta(|meta| -> HookScopeResult<i64> {
            let x = meta.get::<i64>("x")?.unwrap_or(0) + 1;
            meta.set("x", x)?;
            Ok(x)
        })
        .and_then(|bumped| bumped)
}

fn work(transcript: &Transcript) -> HookScopeResult<i32> {
    register_a(transcript);
    register_b(transcript);
    let x = bump_x()?;
    info!(x, "demo work done");
    Ok(42)
}

/// Run the demo: collect hooks, print the result, then fire onB and onA.
pub fn run_demo(settings: &DemoSettings) -> HookScopeResult<Transcript> {
    let transcript = Transcript::default();
    let context = demo_context();

    let (res, HookResult { hooks, meta }) =
        context.try_accept_hooks_with(|| work(&transcript), settings.meta.clone())?;

    transcript.line(res.to_string());
    hooks.call::<OnB>(&settings.name);
    hooks.call::<OnA>(&());

    let x = meta.get::<i64>("x")?.unwrap_or_default();
    transcript.line(format!("meta.x = {}", x));

    Ok(transcript)
}

/// Run one invocation inside another and describe what each one collected.
pub fn run_nested() -> Transcript {
    let transcript = Transcript::default();
    let context = demo_context();

    let (inner, outer) = context.accept_hooks(|| {
        register_a(&transcript);
        let (_, inner) = context.accept_hooks(|| register_b(&transcript));
        inner
    });

    transcript.line(format!("outer: {}", outer.hooks.names().join(", ")));
    transcript.line(format!("inner: {}", inner.hooks.names().join(", ")));

    transcript
}

/// Declared demo hook keys
pub fn keys() -> &'static [&'static str] {
    DemoHooks::KEYS
}
