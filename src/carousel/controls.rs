//! Which controls exist, and what the renderer should show for each.

use std::fmt;

use super::loader::LoadStatus;
use super::view_mode::{Layout, ViewMode};
use crate::catalog::DatasetKey;

/// The controls actually present in the host surface.
///
/// Events aimed at an absent control are ignored rather than treated as
/// errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "one independent presence flag per control"
)]
pub struct ControlSet {
    /// Previous/next window buttons.
    pub navigation: bool,
    /// Slide/list toggles.
    pub view_toggles: bool,
    /// Dataset tabs.
    pub dataset_tabs: bool,
    /// The "load more" button.
    pub load_more: bool,
}

impl ControlSet {
    /// Every control present.
    pub const ALL: Self = Self {
        navigation: true,
        view_toggles: true,
        dataset_tabs: true,
        load_more: true,
    };

    /// No controls at all; the carousel only displays what it is given.
    pub const NONE: Self = Self {
        navigation: false,
        view_toggles: false,
        dataset_tabs: false,
        load_more: false,
    };
}

impl Default for ControlSet {
    fn default() -> Self {
        Self::ALL
    }
}

/// Caption of the "load more" control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadMoreLabel {
    /// More pages may be fetched.
    #[default]
    LoadMore,
    /// The catalog ran out of items.
    NoMoreData,
    /// The session ceiling was reached.
    LastPage,
}

impl LoadMoreLabel {
    /// Returns the caption text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoadMore => "Load more",
            Self::NoMoreData => "No more data",
            Self::LastPage => "Last page",
        }
    }
}

impl fmt::Display for LoadMoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation of the "load more" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMoreAffordance {
    /// Whether the control is shown at all.
    pub visible: bool,
    /// Whether it accepts input.
    pub enabled: bool,
    /// Caption to display.
    pub label: LoadMoreLabel,
}

impl LoadMoreAffordance {
    /// Derives the affordance from the view mode, dataset and load status.
    ///
    /// A failed fetch hides the control; exhaustion and the ceiling keep it
    /// visible but disabled with a terminal caption.
    #[must_use]
    pub const fn derive(
        mode: ViewMode,
        dataset: DatasetKey,
        status: Option<LoadStatus>,
        present: bool,
        busy: bool,
    ) -> Self {
        let shown = present && super::view_mode::load_more_visible(mode, dataset);
        let (visible, enabled, label) = match status {
            None => (false, false, LoadMoreLabel::LoadMore),
            Some(LoadStatus::Available) => (shown, shown && !busy, LoadMoreLabel::LoadMore),
            Some(LoadStatus::Exhausted) => (shown, false, LoadMoreLabel::NoMoreData),
            Some(LoadStatus::CeilingReached) => (shown, false, LoadMoreLabel::LastPage),
            Some(LoadStatus::Failed) => (false, false, LoadMoreLabel::LoadMore),
        };
        Self {
            visible,
            enabled,
            label,
        }
    }
}

/// Snapshot of everything the renderer needs to draw controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    /// Previous/next are shown.
    pub navigation_visible: bool,
    /// Sibling controls accept input; false while a page is being fetched.
    pub controls_enabled: bool,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Layout for the card track.
    pub layout: Layout,
    /// Tab to highlight, when tabs are present.
    pub active_tab: Option<DatasetKey>,
    /// The "load more" control.
    pub load_more: LoadMoreAffordance,
}
