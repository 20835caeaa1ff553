#![allow(non_snake_case)]
//! Widgets, layout and text painting.
//!
//! Views are plain values built by widget functions. [`layout`] stamps ids,
//! binds node refs and collects hit regions and semantics; [`paint`] flattens
//! a committed [`Frame`] into a line-oriented [`Scene`], and [`render_text`]
//! turns that scene into what a terminal shows.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use hookwork_core::runtime::{HitRegion, SemNode};
use hookwork_core::*;

pub mod textfield;
pub use textfield::{TextField, TextFieldState};

/// Indentation added per `List` level.
pub const LIST_INDENT: usize = 2;

/// Groups children without affecting how they paint.
pub fn Fragment() -> View {
    View::new(0, ViewKind::Fragment)
}

pub fn Column() -> View {
    View::new(0, ViewKind::Column).semantics(Semantics::new(Role::Container))
}

pub fn List() -> View {
    View::new(0, ViewKind::List).semantics(Semantics::new(Role::List))
}

/// A list entry identified by `key` among its siblings.
pub fn ListItem(key: impl Into<String>) -> View {
    View::new(0, ViewKind::ListItem)
        .key(key)
        .semantics(Semantics::new(Role::ListItem))
}

pub fn Text(text: impl Into<String>) -> View {
    let text = text.into();
    View::new(0, ViewKind::Text { text: text.clone() }).semantics(Semantics::new(Role::Text).label(text))
}

pub fn Button(text: impl Into<String>, on_click: impl Fn() + 'static) -> View {
    let text = text.into();
    View::new(
        0,
        ViewKind::Button {
            text: text.clone(),
            on_click: Some(Rc::new(on_click)),
        },
    )
    .semantics(Semantics::new(Role::Button).label(text))
}

/// Extension trait for child building
pub trait ViewExt: Sized {
    fn child(self, children: impl IntoChildren) -> Self;
}

impl ViewExt for View {
    fn child(self, children: impl IntoChildren) -> Self {
        self.with_children(children.into_children())
    }
}

pub trait IntoChildren {
    fn into_children(self) -> Vec<View>;
}

impl IntoChildren for View {
    fn into_children(self) -> Vec<View> {
        vec![self]
    }
}

impl IntoChildren for Vec<View> {
    fn into_children(self) -> Vec<View> {
        self
    }
}

impl IntoChildren for Option<View> {
    fn into_children(self) -> Vec<View> {
        self.into_iter().collect()
    }
}

impl<const N: usize> IntoChildren for [View; N] {
    fn into_children(self) -> Vec<View> {
        self.into()
    }
}

macro_rules! impl_into_children_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: IntoChildren),+> IntoChildren for ($($t,)+) {
            fn into_children(self) -> Vec<View> {
                let mut v = Vec::new();
                $(v.extend(self.$idx.into_children());)+
                v
            }
        }
    };
}

impl_into_children_tuple!(0 A, 1 B);
impl_into_children_tuple!(0 A, 1 B, 2 C);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J, 10 K);
impl_into_children_tuple!(0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J, 10 K, 11 L);

/// Key under which the platform keeps a text field's editing state.
pub fn textfield_key(v: &View) -> String {
    v.key.clone().unwrap_or_else(|| format!("tf#{}", v.id))
}

/// Assigns depth-first ids (starting at 1), binds node refs and collects
/// input regions and semantics in paint order.
pub fn layout(root: &View) -> (View, Vec<HitRegion>, Vec<SemNode>) {
    fn stamp(mut v: View, id: &mut u64) -> View {
        v.id = *id;
        *id += 1;
        v.children = v.children.into_iter().map(|c| stamp(c, id)).collect();
        v
    }
    let mut id = 1u64;
    let root = stamp(root.clone(), &mut id);

    let mut hits = Vec::new();
    let mut sems = Vec::new();
    collect(&root, &mut hits, &mut sems);
    log::trace!("layout: {} views, {} hit regions", id - 1, hits.len());
    (root, hits, sems)
}

fn collect(v: &View, hits: &mut Vec<HitRegion>, sems: &mut Vec<SemNode>) {
    if let Some(r) = &v.node_ref {
        r.bind(v.id);
    }

    match &v.kind {
        ViewKind::Button { on_click, .. } => hits.push(HitRegion {
            id: v.id,
            on_click: on_click.clone(),
            focusable: true,
            on_text_change: None,
            tf_state_key: None,
        }),
        ViewKind::TextField { on_change, .. } => hits.push(HitRegion {
            id: v.id,
            on_click: None,
            focusable: true,
            on_text_change: on_change.clone(),
            tf_state_key: Some(textfield_key(v)),
        }),
        _ => {}
    }

    if let Some(s) = &v.semantics {
        sems.push(SemNode {
            id: v.id,
            role: s.role,
            label: s.label.clone(),
            focused: s.focused,
            enabled: s.enabled,
        });
    }

    for child in &v.children {
        collect(child, hits, sems);
    }
}

/// Flattens a committed frame into output lines. Text fields show the
/// platform-held text for their key; `focused` marks the field with a caret.
pub fn paint(
    frame: &Frame,
    textfield_states: &HashMap<String, Rc<RefCell<TextFieldState>>>,
    focused: Option<ViewId>,
) -> Scene {
    let mut painter = Painter {
        scene: Scene::default(),
        textfield_states,
        focused,
        buttons: 0,
        fields: 0,
    };
    painter.walk(&frame.root, 0);
    painter.scene
}

struct Painter<'a> {
    scene: Scene,
    textfield_states: &'a HashMap<String, Rc<RefCell<TextFieldState>>>,
    focused: Option<ViewId>,
    buttons: usize,
    fields: usize,
}

impl Painter<'_> {
    fn walk(&mut self, v: &View, indent: usize) {
        match &v.kind {
            ViewKind::Fragment | ViewKind::Column => {
                for child in &v.children {
                    self.walk(child, indent);
                }
            }
            ViewKind::List => {
                for child in &v.children {
                    self.walk(child, indent + LIST_INDENT);
                }
            }
            ViewKind::ListItem => {
                self.scene.nodes.push(SceneNode::Item {
                    indent,
                    key: v.key.clone(),
                    text: v.text_content(),
                });
            }
            ViewKind::Text { text } => {
                // An empty text occupies no line.
                if !text.is_empty() {
                    self.scene.nodes.push(SceneNode::Text {
                        indent,
                        text: text.clone(),
                    });
                }
            }
            ViewKind::Button { text, .. } => {
                self.buttons += 1;
                self.scene.nodes.push(SceneNode::Button {
                    indent,
                    id: v.id,
                    ordinal: self.buttons,
                    label: text.clone(),
                });
            }
            ViewKind::TextField { hint, .. } => {
                self.fields += 1;
                let text = self
                    .textfield_states
                    .get(&textfield_key(v))
                    .map(|s| s.borrow().text.clone())
                    .unwrap_or_default();
                self.scene.nodes.push(SceneNode::TextField {
                    indent,
                    id: v.id,
                    ordinal: self.fields,
                    text,
                    hint: hint.clone(),
                    focused: self.focused == Some(v.id),
                });
            }
        }
    }
}

/// Renders a scene as terminal lines.
///
/// Buttons read `(n) [ label ]` and text fields `<n> text`, where `n` is the
/// ordinal used by `click n` / `type n ..`. An empty unfocused field shows its
/// hint in parentheses; the focused field ends with a `_` caret.
pub fn render_text(scene: &Scene) -> String {
    let mut out = String::new();
    for node in &scene.nodes {
        let line = match node {
            SceneNode::Text { indent, text } => format!("{}{text}", pad(*indent)),
            SceneNode::Item { indent, text, .. } => format!("{}- {text}", pad(*indent)),
            SceneNode::Button {
                indent,
                ordinal,
                label,
                ..
            } => format!("{}({ordinal}) [ {label} ]", pad(*indent)),
            SceneNode::TextField {
                indent,
                ordinal,
                text,
                hint,
                focused,
                ..
            } => {
                let body = if *focused {
                    format!("{text}_")
                } else if text.is_empty() && !hint.is_empty() {
                    format!("({hint})")
                } else {
                    text.clone()
                };
                format!("{}<{ordinal}> {body}", pad(*indent))
            }
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn pad(indent: usize) -> String {
    " ".repeat(indent)
}
