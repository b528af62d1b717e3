//! Partitioning of an ordered item list into fixed-size display windows.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Default number of cards visible at once in slide mode.
pub const DEFAULT_WINDOW_SIZE: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Ordered windows covering every item index exactly once.
///
/// Every window except the last holds exactly `window_size` indices; the
/// last holds whatever remains. An empty item list still yields one (empty)
/// window so that "current window 0" is always addressable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSet {
    windows: Vec<Range<usize>>,
}

impl WindowSet {
    /// Returns the number of windows (never zero).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.windows.len()
    }

    /// Always false; present for API symmetry with `len`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Returns the index range covered by a window.
    #[must_use]
    pub fn window(&self, index: usize) -> Option<Range<usize>> {
        self.windows.get(index).cloned()
    }

    /// Returns the item offset a window starts at.
    ///
    /// The renderer translates the card track by this many cards to show the
    /// window in slide mode.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> Option<usize> {
        self.windows.get(index).map(|window| window.start)
    }

    /// Iterates over the windows in order.
    pub fn iter(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.windows.iter().cloned()
    }

    /// Returns true when a window exists but contains nothing to show.
    #[must_use]
    pub fn is_empty_window(&self, index: usize) -> bool {
        self.windows.get(index).is_some_and(|window| window.is_empty())
    }
}

/// Computes the display windows for `item_count` items.
///
/// Windows are walked in strides of `window_size` from index 0. The final
/// window receives every remaining index, so it may be shorter than a full
/// stride; when `item_count <= window_size` it is the only window.
#[must_use]
pub fn compute_windows(item_count: usize, window_size: NonZeroUsize) -> WindowSet {
    let stride = window_size.get();
    let mut windows: Vec<Range<usize>> = (0..item_count)
        .step_by(stride)
        .map(|start| start..start.saturating_add(stride).min(item_count))
        .collect();

    if windows.is_empty() {
        windows.push(0..0);
    }

    WindowSet { windows }
}
