use hookwork_core::runtime::HitRegion;
use hookwork_core::*;

pub(crate) fn hit_index_by_id(frame: &Frame, id: ViewId) -> Option<usize> {
    frame.hit_regions.iter().position(|h| h.id == id)
}

fn is_button(h: &HitRegion) -> bool {
    h.on_click.is_some() && h.tf_state_key.is_none()
}

fn is_field(h: &HitRegion) -> bool {
    h.tf_state_key.is_some()
}

/// The `n`-th (1-based) button in paint order.
pub(crate) fn nth_button(frame: &Frame, n: usize) -> Option<&HitRegion> {
    frame
        .hit_regions
        .iter()
        .filter(|h| is_button(h))
        .nth(n.checked_sub(1)?)
}

/// The `n`-th (1-based) text field in paint order.
pub(crate) fn nth_field(frame: &Frame, n: usize) -> Option<&HitRegion> {
    frame
        .hit_regions
        .iter()
        .filter(|h| is_field(h))
        .nth(n.checked_sub(1)?)
}

/// First button whose label is `label`.
pub(crate) fn button_by_label<'a>(frame: &'a Frame, label: &str) -> Option<&'a HitRegion> {
    let node = frame.find(Role::Button, label)?;
    frame.hit_regions.get(hit_index_by_id(frame, node.id)?)
}

/// Hit region of the text field kept under `key`.
pub(crate) fn field_by_key<'a>(frame: &'a Frame, key: &str) -> Option<&'a HitRegion> {
    frame
        .hit_regions
        .iter()
        .find(|h| h.tf_state_key.as_deref() == Some(key))
}
