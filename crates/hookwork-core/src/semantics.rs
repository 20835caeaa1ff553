/// What a node is to assistive tech and to input routing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Text,
    Button,
    TextField,
    Container,
    List,
    ListItem,
}

/// Accessibility data for one view. Layout flattens these into
/// [`SemNode`](crate::SemNode)s.
#[derive(Clone, Debug)]
pub struct Semantics {
    pub role: Role,
    /// Announced name; buttons and text lines use their text.
    pub label: Option<String>,
    pub focused: bool,
    /// Disabled nodes stay in the tree but cannot be activated.
    pub enabled: bool,
}

impl Semantics {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            label: None,
            focused: false,
            enabled: true,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
