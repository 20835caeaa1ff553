//! Keyed effects.
//!
//! Both helpers are slot-based (like `remember`): the Nth effect call in a
//! component always refers to the Nth stored key. The effect body does not
//! run during composition; it is queued and runs once the frame has been
//! laid out, inside the owning component's scope.

use std::cell::RefCell;

use crate::runtime::queue_effect;
use crate::{Dispose, current_scope, on_unmount, remember, scoped_effect};

/// Runs `effect` after commit whenever `key` differs from the key seen on
/// the previous composition. Nothing is cancelled on unmount; async work
/// started here should hold a [`crate::Lifetime`].
pub fn launched_effect<K: PartialEq + 'static>(key: K, effect: impl FnOnce() + 'static) {
    let last_key = remember(|| RefCell::new(None::<K>));

    let mut last = last_key.borrow_mut();
    if last.as_ref() != Some(&key) {
        *last = Some(key);
        let scope = current_scope();
        queue_effect(Box::new(move || match scope {
            Some(scope) => scope.run(effect),
            None => effect(),
        }));
    }
}

/// Like [`launched_effect`], but the effect returns a cleanup that runs when
/// the key changes or the component unmounts.
pub fn disposable_effect<K: PartialEq + 'static>(
    key: K,
    effect: impl FnOnce() -> Dispose + 'static,
) {
    let last_key = remember(|| RefCell::new(None::<K>));
    let cleanup_slot = remember(|| RefCell::new(None::<Dispose>));
    let installed = remember(|| RefCell::new(false));

    // Install a single unmount disposer for this callsite.
    if !*installed.borrow() {
        *installed.borrow_mut() = true;
        let cleanup_slot = cleanup_slot.clone();
        scoped_effect(move || {
            on_unmount(move || {
                let cleanup = cleanup_slot.borrow_mut().take();
                if let Some(d) = cleanup {
                    d.run();
                }
            })
        });
    }

    let changed = last_key.borrow().as_ref() != Some(&key);
    if changed {
        *last_key.borrow_mut() = Some(key);
        let scope = current_scope();
        queue_effect(Box::new(move || {
            let previous = cleanup_slot.borrow_mut().take();
            if let Some(d) = previous {
                d.run();
            }
            let d = match scope {
                Some(scope) => scope.run(effect),
                None => effect(),
            };
            *cleanup_slot.borrow_mut() = Some(d);
        }));
    }
}
