//! Directional caret movement across page boundaries.
//!
//! Pure focus transitions; page content is never touched.

use crate::model::page::FocusTarget;
use crate::reflow::text::last_line_start;
use crate::store::page_store::PageSequence;

/// Keys the core reacts to. Everything else is handled by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    ArrowUp,
    ArrowDown,
}

/// Cross-page move for an arrow key, or `None` when the caret stays on its
/// page.
///
/// - `ArrowDown` at the end of a page goes to the start of the next page.
/// - `ArrowUp` at offset 0 goes to the start of the previous page's last line.
pub fn navigate(pages: &PageSequence, focus: FocusTarget, key: Key) -> Option<FocusTarget> {
    let page = pages.page(focus.page_id)?;
    match key {
        Key::ArrowDown if focus.caret >= page.char_len() => {
            let next = pages.next_of(page.id)?;
            Some(FocusTarget::start_of(next))
        }
        Key::ArrowUp if focus.caret == 0 => {
            let previous_id = pages.previous_of(page.id)?;
            let previous = pages.page(previous_id)?;
            Some(FocusTarget::new(
                previous_id,
                last_line_start(&previous.content),
            ))
        }
        _ => None,
    }
}
