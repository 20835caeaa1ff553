use hookwork_core::View;
use hookwork_ui::{ListItem, Text, ViewExt};

/// List entry for one author.
pub fn Author(name: &str, key: String) -> View {
    ListItem(key).child(Text(name))
}
