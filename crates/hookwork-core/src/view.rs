use crate::NodeRef;
use std::rc::Rc;

pub type ViewId = u64;

pub type Callback = Rc<dyn Fn()>;
pub type TextCallback = Rc<dyn Fn(String)>;

#[derive(Clone)]
pub enum ViewKind {
    /// Transparent grouping; paints its children in place.
    Fragment,
    Column,
    /// Bulleted list; children are usually `ListItem`s.
    List,
    ListItem,
    Text {
        text: String,
    },
    Button {
        text: String,
        on_click: Option<Callback>,
    },
    TextField {
        hint: String,
        on_change: Option<TextCallback>,
    },
}

impl std::fmt::Debug for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Fragment => write!(f, "Fragment"),
            ViewKind::Column => write!(f, "Column"),
            ViewKind::List => write!(f, "List"),
            ViewKind::ListItem => write!(f, "ListItem"),
            ViewKind::Text { text } => f.debug_struct("Text").field("text", text).finish(),
            ViewKind::Button { text, .. } => f
                .debug_struct("Button")
                .field("text", text)
                .field("on_click", &"<callback>")
                .finish(),
            ViewKind::TextField { hint, .. } => f
                .debug_struct("TextField")
                .field("hint", hint)
                .finish(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    /// Stable identity among siblings (list items, text field state).
    pub key: Option<String>,
    pub node_ref: Option<NodeRef>,
    pub children: Vec<View>,
    pub semantics: Option<crate::semantics::Semantics>,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            key: None,
            node_ref: None,
            children: vec![],
            semantics: None,
        }
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn semantics(mut self, s: crate::semantics::Semantics) -> Self {
        self.semantics = Some(s);
        self
    }
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
    /// Binds `r` to this view once the frame is laid out.
    pub fn node_ref(mut self, r: &NodeRef) -> Self {
        self.node_ref = Some(r.clone());
        self
    }

    /// Concatenated text of this view and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let ViewKind::Text { text } = &self.kind {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Depth-first search for every view matching `pred`.
    pub fn find_all(&self, pred: &dyn Fn(&View) -> bool) -> Vec<&View> {
        let mut out = Vec::new();
        self.walk(&mut |v| {
            if pred(v) {
                out.push(v);
            }
        });
        out
    }

    fn walk<'a>(&'a self, f: &mut dyn FnMut(&'a View)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}

/// Painted frame: one entry per output line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Text {
        indent: usize,
        text: String,
    },
    Item {
        indent: usize,
        key: Option<String>,
        text: String,
    },
    Button {
        indent: usize,
        id: ViewId,
        /// 1-based position among the frame's buttons.
        ordinal: usize,
        label: String,
    },
    TextField {
        indent: usize,
        id: ViewId,
        /// 1-based position among the frame's text fields.
        ordinal: usize,
        text: String,
        hint: String,
        focused: bool,
    },
}
