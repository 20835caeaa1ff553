//! # Composition locals
//!
//! Hookwork passes app-wide collaborators (HTTP client, endpoints, fetch
//! settings) down the tree through thread‑local “composition locals”
//! instead of threading them through every view function:
//!
//! ```rust
//! use hookwork_core::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Greeting(&'static str);
//!
//! provide(Greeting("hi"), || {
//!     // all views composed here see the greeting
//!     assert_eq!(local::<Greeting>(), Some(Greeting("hi")));
//! });
//! assert_eq!(local::<Greeting>(), None);
//! ```
//!
//! Locals are only visible while composing. Effects and spawned tasks run
//! later, so read the local during composition and move the value into the
//! effect.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        } else {
            // no frame: create a temporary one
            let mut m = HashMap::new();
            m.insert(t, v);
            st.borrow_mut().push(m);
        }
    });
}

/// Makes `value` visible to `local::<T>()` for everything composed in `f`.
pub fn provide<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<T>(), Box::new(value));
        f()
    })
}

/// Innermost provided `T`, if any.
pub fn local<T: Clone + 'static>() -> Option<T> {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return Some(t.clone());
            }
        }
        None
    })
}

pub fn local_or_default<T: Clone + Default + 'static>() -> T {
    local::<T>().unwrap_or_default()
}
