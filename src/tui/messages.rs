//! Message types for the TUI update loop.
//!
//! This module defines all message types that can be sent to the application's
//! update function. Messages represent user actions, async command results,
//! and system events.

use serde_json::Value;

use crate::carousel::PageRequest;
use crate::catalog::{CatalogError, DatasetKey};

/// Messages for the box-office TUI application.
#[derive(Debug, Clone)]
pub enum AppMsg {
    // Carousel
    /// Show a dataset.
    SelectDataset(DatasetKey),
    /// Move to the next window.
    NextWindow,
    /// Move to the previous window.
    PreviousWindow,
    /// Switch to slide view.
    ShowSlides,
    /// Switch to list view.
    ShowList,
    /// Flip between slide and list view.
    ToggleViewMode,
    /// Fetch the next page of the active dataset.
    LoadMore,

    // List scrolling
    /// Scroll the list view up one row.
    ScrollUp,
    /// Scroll the list view down one row.
    ScrollDown,

    // Data loading
    /// A page fetch finished.
    PageFetched {
        /// The request that was performed.
        request: PageRequest,
        /// Page body or the transport failure.
        response: Result<Value, CatalogError>,
        /// Fetch time in milliseconds.
        latency_ms: u64,
    },

    // Application lifecycle
    /// Startup event that triggers the first render.
    Initialized,
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,

    // Window events
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
}

impl AppMsg {
    /// Returns true for messages that drive the carousel controller.
    #[must_use]
    pub const fn is_carousel(&self) -> bool {
        matches!(
            self,
            Self::SelectDataset(_)
                | Self::NextWindow
                | Self::PreviousWindow
                | Self::ShowSlides
                | Self::ShowList
                | Self::ToggleViewMode
                | Self::LoadMore
                | Self::PageFetched { .. }
        )
    }

    /// Returns true for list scrolling messages.
    #[must_use]
    pub const fn is_scroll(&self) -> bool {
        matches!(self, Self::ScrollUp | Self::ScrollDown)
    }
}
