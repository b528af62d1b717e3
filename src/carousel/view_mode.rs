//! Slide/list view mode and the visibility rules that depend on it.

use crate::catalog::DatasetKey;

/// How the carousel presents the active dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// One window visible at a time, navigable with previous/next.
    #[default]
    Slide,
    /// Every loaded item visible in a wrapped layout.
    List,
}

impl ViewMode {
    /// Returns a short label for status lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Slide => "slide",
            Self::List => "list",
        }
    }
}

/// Card track layout the renderer should apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A single row translated to the current window's offset.
    Track,
    /// Cards wrapped onto as many rows as needed and centred.
    Wrapped,
}

/// How the renderer should reach a new window offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowTransition {
    /// Animated slide to the new offset.
    Move,
    /// Immediate placement with no animation.
    Jump,
}

/// Result of a mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    /// Mode after the transition.
    pub mode: ViewMode,
    /// Layout the renderer should switch to.
    pub layout: Layout,
    /// How to place the current window, when windows apply.
    pub transition: Option<WindowTransition>,
}

/// Binary slide/list state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewModeController {
    mode: ViewMode,
}

impl ViewModeController {
    /// Creates a controller starting in `mode`.
    #[must_use]
    pub const fn new(mode: ViewMode) -> Self {
        Self { mode }
    }

    /// Returns the current mode.
    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Returns the layout for the current mode.
    #[must_use]
    pub const fn layout(&self) -> Layout {
        match self.mode {
            ViewMode::Slide => Layout::Track,
            ViewMode::List => Layout::Wrapped,
        }
    }

    /// Switches to list mode; windows stop affecting what is shown.
    pub const fn to_list(&mut self) -> ModeChange {
        self.mode = ViewMode::List;
        ModeChange {
            mode: self.mode,
            layout: Layout::Wrapped,
            transition: None,
        }
    }

    /// Switches to slide mode; the current window is placed without animation.
    pub const fn to_slide(&mut self) -> ModeChange {
        self.mode = ViewMode::Slide;
        ModeChange {
            mode: self.mode,
            layout: Layout::Track,
            transition: Some(WindowTransition::Jump),
        }
    }
}

/// Previous/next controls show only in slide mode and only when the items do
/// not fit in one window.
#[must_use]
pub const fn navigation_visible(mode: ViewMode, item_count: usize, window_size: usize) -> bool {
    matches!(mode, ViewMode::Slide) && item_count > window_size
}

/// "Load more" shows only for pageable datasets in list mode.
#[must_use]
pub const fn load_more_visible(mode: ViewMode, dataset: DatasetKey) -> bool {
    dataset.is_pageable() && matches!(mode, ViewMode::List)
}
