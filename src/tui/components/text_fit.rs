//! Display-width aware text fitting.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Shortens `text` to at most `max_width` terminal columns.
///
/// Text that does not fit ends in `...`; widths too small for any text plus
/// the ellipsis are filled with dots.
pub(crate) fn fit_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width <= ELLIPSIS.len() {
        return ".".repeat(max_width);
    }

    let budget = max_width.saturating_sub(ELLIPSIS.len());
    let mut used = 0usize;
    let mut fitted: String = text
        .chars()
        .take_while(|ch| {
            let next = used.saturating_add(UnicodeWidthChar::width(*ch).unwrap_or(0));
            let fits = next <= budget;
            if fits {
                used = next;
            }
            fits
        })
        .collect();
    fitted.push_str(ELLIPSIS);
    fitted
}
