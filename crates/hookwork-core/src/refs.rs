//! Non-reactive handles: mutable cells and element references.
//!
//! Neither type participates in recomposition. Writing a [`MutableRef`]
//! never schedules a frame, and nothing a view paints should read from one.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::{ViewId, remember, runtime};

/// View-scoped mutable storage that survives recomposition and never
/// triggers it.
pub struct MutableRef<T>(Rc<RefCell<T>>);

impl<T> Clone for MutableRef<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> MutableRef<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().clone()
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.0.borrow_mut());
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for MutableRef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MutableRef").field(&self.0.borrow()).finish()
    }
}

/// Handle to a rendered view, resolved after layout.
#[derive(Clone, Debug, Default)]
pub struct NodeRef(Rc<Cell<Option<ViewId>>>);

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by layout for the view carrying this ref.
    pub fn bind(&self, id: ViewId) {
        self.0.set(Some(id));
    }

    pub fn get(&self) -> Option<ViewId> {
        self.0.get()
    }

    /// Moves input focus to the referenced view. Changes no state and does
    /// not recompose; the platform applies it on its next turn.
    pub fn focus(&self) -> bool {
        match self.get() {
            Some(id) => {
                runtime::request_focus(id);
                true
            }
            None => {
                log::warn!("focus() on a NodeRef that was never laid out");
                false
            }
        }
    }
}

pub fn remember_ref<T: 'static>(init: impl FnOnce() -> T) -> MutableRef<T> {
    remember(|| MutableRef::new(init())).as_ref().clone()
}

pub fn remember_node_ref() -> NodeRef {
    remember(NodeRef::new).as_ref().clone()
}
