use std::ops::Range;
use std::rc::Rc;

use hookwork_core::*;
use unicode_segmentation::UnicodeSegmentation;

/// Find the grapheme boundary at or before `byte`.
fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}

fn clamp_to_char_boundary(text: &str, mut byte: usize) -> usize {
    byte = byte.min(text.len());
    while byte > 0 && !text.is_char_boundary(byte) {
        byte -= 1;
    }
    byte
}

/// Editing state of one text field, owned by the platform and looked up by the
/// field's state key. Selection offsets are byte indices on grapheme
/// boundaries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextFieldState {
    pub text: String,
    pub selection: Range<usize>,
}

impl TextFieldState {
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            selection: end..end,
        }
    }

    pub fn cursor(&self) -> usize {
        self.selection.end.min(self.text.len())
    }

    /// Replaces the selection with `text` and collapses the caret after it.
    pub fn insert_text(&mut self, text: &str) {
        let mut start = clamp_to_char_boundary(&self.text, self.selection.start);
        let mut end = clamp_to_char_boundary(&self.text, self.selection.end);
        if end < start {
            std::mem::swap(&mut start, &mut end);
        }
        self.text.replace_range(start..end, text);
        let caret = start + text.len();
        self.selection = caret..caret;
    }

    /// Removes the selection, or the grapheme before the caret.
    pub fn delete_backward(&mut self) {
        if self.selection.start == self.selection.end {
            let pos = self.cursor();
            if pos > 0 {
                let prev = prev_grapheme_boundary(&self.text, pos);
                self.text.replace_range(prev..pos, "");
                self.selection = prev..prev;
            }
        } else {
            self.insert_text("");
        }
    }
}

/// Single-line input. The field's text lives in platform state; `on_change`
/// receives the full new value after every edit.
pub fn TextField(hint: impl Into<String>, on_change: impl Fn(String) + 'static) -> View {
    View::new(
        0,
        ViewKind::TextField {
            hint: hint.into(),
            on_change: Some(Rc::new(on_change)),
        },
    )
    .semantics(Semantics::new(Role::TextField))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textfield_insert() {
        let mut state = TextFieldState::default();
        state.insert_text("Hello");
        assert_eq!(state.text, "Hello");
        assert_eq!(state.selection, 5..5);
    }

    #[test]
    fn test_textfield_delete_backward() {
        let mut state = TextFieldState::default();
        state.insert_text("Hello");
        state.delete_backward();
        assert_eq!(state.text, "Hell");
        assert_eq!(state.selection, 4..4);
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut state = TextFieldState::with_text("Hello World");
        state.selection = 0..5;
        state.insert_text("Hi");
        assert_eq!(state.text, "Hi World");
        assert_eq!(state.selection, 2..2);
    }

    #[test]
    fn test_delete_backward_removes_whole_grapheme() {
        let mut state = TextFieldState::with_text("ne\u{301}");
        state.delete_backward();
        assert_eq!(state.text, "n");
        assert_eq!(state.cursor(), 1);

        state.delete_backward();
        state.delete_backward();
        assert_eq!(state.text, "");
        assert_eq!(state.selection, 0..0);
    }

    #[test]
    fn test_delete_backward_clears_selection_first() {
        let mut state = TextFieldState::with_text("abc");
        state.selection = 1..3;
        state.delete_backward();
        assert_eq!(state.text, "a");
        assert_eq!(state.cursor(), 1);
    }
}
