//! # State, Refs, Effects, and Resources
//!
//! Hookwork uses a small slot-based runtime instead of an explicit widget
//! tree with mutable fields. The main pieces:
//!
//! - `Signal<T>`: observed value; every write requests a recomposition.
//! - `remember*`: storage bound to the enclosing component.
//! - `MutableRef<T>` / `NodeRef`: non-reactive cells and element handles.
//! - `launched_effect` / `disposable_effect`: keyed side effects that run
//!   after the frame is committed.
//! - `Resource<T, E>`: the idle/pending/resolved/rejected lifecycle of one
//!   async request.
//!
//! ## Signals
//!
//! ```rust
//! use hookwork_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! assert!(take_recompose_request());
//! ```
//!
//! ## Components and remembered state
//!
//! `remember` is order‑based within a component: the Nth call always refers
//! to the Nth stored value. `component(key, body)` gives `body` its own slot
//! table and `Scope`; a component that is not composed in a frame is
//! unmounted at the end of that frame and its scope is disposed.
//!
//! ```rust,ignore
//! fn Counter() -> View {
//!     let count = remember(|| signal(0));
//!     let clicks = remember_ref(|| 0); // never recomposes
//!
//!     hookwork_ui::Button(format!("Count = {}", count.get()), move || {
//!         count.update(|c| *c += 1);
//!         clicks.update(|c| *c += 1);
//!     })
//! }
//!
//! let view = component("Counter", Counter);
//! ```
//!
//! ## Effects
//!
//! Effects are keyed: `launched_effect(url.clone(), ..)` runs once after the
//! first commit and again only when `url` changes. Async work spawned from an
//! effect should go through a `Resource` ticket (or hold the scope's
//! `Lifetime`) so late results are dropped once the view is gone.

pub mod alert;
pub mod effects;
pub mod effects_ext;
pub mod locals;
pub mod prelude;
pub mod refs;
pub mod resource;
pub mod runtime;
pub mod scope;
pub mod semantics;
pub mod signal;
pub mod task;
pub mod tests;
pub mod view;

pub use alert::*;
pub use effects::*;
pub use effects_ext::*;
pub use locals::*;
pub use prelude::*;
pub use refs::*;
pub use resource::*;
pub use runtime::*;
pub use semantics::*;
pub use signal::*;
pub use view::*;
