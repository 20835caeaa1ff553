use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use tokio::sync::Notify;

use crate::scope::Scope;
use crate::{View, ViewId, semantics::Role};

const ROOT_PATH: &str = "<root>";

new_key_type! {
    /// Handle to one mounted component group.
    pub struct GroupId;
}

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
    static RECOMPOSE: Cell<bool> = const { Cell::new(false) };
    static INVALIDATION: Rc<Notify> = Rc::new(Notify::new());
    static PENDING_EFFECTS: RefCell<Vec<Box<dyn FnOnce()>>> = RefCell::new(Vec::new());
    static FOCUS_REQUEST: Cell<Option<ViewId>> = const { Cell::new(None) };
}

/// Slots and scope of one component instance.
struct Group {
    path: String,
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
    keyed_slots: HashMap<String, Box<dyn Any>>,
    scope: Scope,
    seen: bool,
}

impl Group {
    fn new(path: String) -> Self {
        Self {
            path,
            slots: Vec::new(),
            cursor: 0,
            keyed_slots: HashMap::new(),
            scope: Scope::new(),
            seen: false,
        }
    }
}

/// Positional memo table, partitioned into component groups.
///
/// A group lives as long as its component keeps being composed. Groups not
/// reached during a frame are unmounted when the frame ends: their slots
/// are dropped and their scope is disposed.
#[derive(Default)]
pub struct Composer {
    groups: SlotMap<GroupId, Group>,
    by_path: HashMap<String, GroupId>,
    stack: SmallVec<[GroupId; 8]>,
}

impl Composer {
    fn enter(&mut self, key: &str) -> Scope {
        let path = match self.stack.last() {
            Some(parent) => format!("{}/{}", self.groups[*parent].path, key),
            None => key.to_string(),
        };
        let id = self.group_for(path);
        let group = &mut self.groups[id];
        if group.seen {
            log::warn!(
                "component '{}' composed twice in one frame; both share slots",
                group.path
            );
        }
        group.seen = true;
        group.cursor = 0;
        self.stack.push(id);
        group.scope.clone()
    }

    fn exit(&mut self) {
        self.stack.pop();
    }

    fn group_for(&mut self, path: String) -> GroupId {
        if let Some(id) = self.by_path.get(&path) {
            return *id;
        }
        log::debug!("mount {path}");
        let id = self.groups.insert(Group::new(path.clone()));
        self.by_path.insert(path, id);
        id
    }

    fn current(&mut self) -> &mut Group {
        let top = self.stack.last().copied();
        let id = match top {
            Some(id) => id,
            // Outside any frame (tests, tools): fall back to the root group.
            None => self.group_for(ROOT_PATH.to_string()),
        };
        &mut self.groups[id]
    }

    /// Removes every group that was not composed since the last sweep and
    /// hands back their scopes for disposal.
    fn sweep(&mut self) -> Vec<Scope> {
        let stale: Vec<GroupId> = self
            .groups
            .iter()
            .filter(|(_, g)| !g.seen)
            .map(|(id, _)| id)
            .collect();
        let mut scopes = Vec::with_capacity(stale.len());
        for id in stale {
            if let Some(group) = self.groups.remove(id) {
                log::debug!("unmount {}", group.path);
                self.by_path.remove(&group.path);
                scopes.push(group.scope);
            }
        }
        for (_, group) in self.groups.iter_mut() {
            group.seen = false;
        }
        scopes
    }

    /// Number of mounted component groups, the root included.
    pub fn mounted(&self) -> usize {
        self.groups.len()
    }

    pub fn is_mounted(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }
}

pub struct ComposeGuard {
    scope: Scope,
}

impl ComposeGuard {
    pub fn begin() -> Self {
        // Writes made while composing still count for the next frame.
        RECOMPOSE.with(|r| r.set(false));
        let scope = COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.stack.clear();
            c.enter(ROOT_PATH)
        });
        ComposeGuard { scope }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl Drop for ComposeGuard {
    fn drop(&mut self) {
        let unmounted = COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.exit();
            c.sweep()
        });
        for scope in unmounted {
            scope.dispose();
        }
    }
}

/// Composes `body` as a keyed component with its own slots and scope.
///
/// The key is scoped to the parent component, so list items can use their
/// record id. The component unmounts on the first frame that does not reach
/// this call.
pub fn component<R>(key: impl AsRef<str>, body: impl FnOnce() -> R) -> R {
    struct Exit;
    impl Drop for Exit {
        fn drop(&mut self) {
            COMPOSER.with(|c| c.borrow_mut().exit());
        }
    }

    let scope = COMPOSER.with(|c| c.borrow_mut().enter(key.as_ref()));
    let _exit = Exit;
    scope.run(body)
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let (cursor, existing) = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let group = c.current();
        let cursor = group.cursor;
        group.cursor += 1;
        let existing = group
            .slots
            .get(cursor)
            .map(|slot| slot.downcast_ref::<Rc<T>>().cloned());
        (cursor, existing)
    });

    match existing {
        Some(Some(rc)) => return rc,
        Some(None) => log::warn!(
            "remember: slot {} type changed; replacing. \
             If this is due to conditional composition, prefer remember_with_key.",
            cursor
        ),
        None => {}
    }

    // init runs outside the borrow so it may read other state freely.
    let rc: Rc<T> = Rc::new(init());
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let group = c.current();
        if cursor < group.slots.len() {
            group.slots[cursor] = Box::new(rc.clone());
        } else {
            group.slots.push(Box::new(rc.clone()));
        }
    });
    rc
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let existing = COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        c.current()
            .keyed_slots
            .get(&key)
            .map(|slot| slot.downcast_ref::<Rc<T>>().cloned())
    });

    match existing {
        Some(Some(rc)) => return rc,
        Some(None) => log::warn!(
            "remember_with_key: key '{}' reused with a different type; replacing.",
            key
        ),
        None => {}
    }

    let rc: Rc<T> = Rc::new(init());
    COMPOSER.with(|c| {
        c.borrow_mut()
            .current()
            .keyed_slots
            .insert(key, Box::new(rc.clone()));
    });
    rc
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}

/// Marks the current frame stale and wakes whoever awaits [`invalidated`].
pub fn request_recompose() {
    RECOMPOSE.with(|r| r.set(true));
    INVALIDATION.with(|n| n.notify_one());
}

pub fn recompose_requested() -> bool {
    RECOMPOSE.with(|r| r.get())
}

/// Returns and clears the pending recomposition request.
pub fn take_recompose_request() -> bool {
    RECOMPOSE.with(|r| r.replace(false))
}

/// Resolves once a recomposition has been requested.
pub async fn invalidated() {
    if recompose_requested() {
        return;
    }
    let notify = INVALIDATION.with(|n| n.clone());
    notify.notified().await;
}

pub(crate) fn queue_effect(effect: Box<dyn FnOnce()>) {
    PENDING_EFFECTS.with(|q| q.borrow_mut().push(effect));
}

/// Runs effects queued by the last composition, in composition order.
pub fn flush_effects() -> usize {
    let mut ran = 0;
    loop {
        let batch = PENDING_EFFECTS.with(|q| std::mem::take(&mut *q.borrow_mut()));
        if batch.is_empty() {
            return ran;
        }
        for effect in batch {
            effect();
            ran += 1;
        }
    }
}

/// Asks the platform to move input focus to `id` on its next turn.
pub fn request_focus(id: ViewId) {
    FOCUS_REQUEST.with(|f| f.set(Some(id)));
}

pub fn take_focus_request() -> Option<ViewId> {
    FOCUS_REQUEST.with(|f| f.take())
}

/// Output of one composition: laid-out tree plus input/semantics.
pub struct Frame {
    pub root: View,
    pub hit_regions: Vec<HitRegion>,
    pub semantics_nodes: Vec<SemNode>,
    pub focus_chain: Vec<ViewId>,
}

#[derive(Clone)]
pub struct HitRegion {
    pub id: ViewId,
    pub on_click: Option<Rc<dyn Fn()>>,
    pub focusable: bool,
    pub on_text_change: Option<Rc<dyn Fn(String)>>,
    /// If this hit region belongs to a TextField, this persistent key is used
    /// for looking up platform-managed TextFieldState. Falls back to `id` if None.
    pub tf_state_key: Option<String>,
}

/// Flattened semantics node produced by layout.
#[derive(Clone, Debug)]
pub struct SemNode {
    /// Stable id, shared with the associated `HitRegion` / `ViewId`.
    pub id: ViewId,
    pub role: Role,
    pub label: Option<String>,
    pub focused: bool,
    pub enabled: bool,
}

impl Frame {
    pub fn hit(&self, id: ViewId) -> Option<&HitRegion> {
        self.hit_regions.iter().find(|h| h.id == id)
    }

    /// First node with `role` whose label equals `label`.
    pub fn find(&self, role: Role, label: &str) -> Option<&SemNode> {
        self.semantics_nodes
            .iter()
            .find(|n| n.role == role && n.label.as_deref() == Some(label))
    }

    /// Nodes with `role`, in paint order.
    pub fn nodes(&self, role: Role) -> impl Iterator<Item = &SemNode> {
        self.semantics_nodes.iter().filter(move |n| n.role == role)
    }
}

pub struct Scheduler {
    /// Focused view of the current frame. Ids are positional, so platforms
    /// re-resolve this after every composition.
    pub focused: Option<ViewId>,
    compositions: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            focused: None,
            compositions: 0,
        }
    }

    /// Number of frames composed so far.
    pub fn compositions(&self) -> u64 {
        self.compositions
    }

    /// Composes the root, lays it out, then runs the effects the composition
    /// queued. Effects see a committed frame (node refs are bound).
    pub fn compose<F>(
        &mut self,
        mut build_root: F,
        layout: impl Fn(&View) -> (View, Vec<HitRegion>, Vec<SemNode>),
    ) -> Frame
    where
        F: FnMut(&mut Scheduler) -> View,
    {
        let guard = ComposeGuard::begin();
        let root = guard.scope().run(|| build_root(self));
        drop(guard);

        let (root, hits, sem) = layout(&root);
        let focus_chain: Vec<ViewId> = hits.iter().filter(|h| h.focusable).map(|h| h.id).collect();
        self.compositions += 1;

        let ran = flush_effects();
        log::trace!("frame {} committed, {ran} effects", self.compositions);

        Frame {
            root,
            hit_regions: hits,
            semantics_nodes: sem,
            focus_chain,
        }
    }
}
