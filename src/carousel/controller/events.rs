//! Events fed into the controller and notifications sent out of it.

use serde_json::Value;

use super::ViewState;
use crate::carousel::controls::Affordances;
use crate::carousel::dataset::SwitchReport;
use crate::carousel::loader::{LoadOutcome, PageRequest};
use crate::carousel::view_mode::{ModeChange, WindowTransition};
use crate::catalog::{CatalogError, DatasetKey};

/// Input to [`super::CarouselController::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    /// A dataset tab was selected.
    SelectDataset(DatasetKey),
    /// Advance one window, wrapping to the first after the last.
    Next,
    /// Go back one window, wrapping to the last before the first.
    Previous,
    /// Switch to list mode.
    ShowList,
    /// Switch to slide mode.
    ShowSlides,
    /// Fetch the next page of the active dataset.
    LoadMore,
    /// A page fetch finished.
    PageLoaded {
        /// The request this response answers.
        request: PageRequest,
        /// Page body, or the transport failure.
        response: Result<Value, CatalogError>,
    },
}

/// What caused a [`StateChange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeCause {
    /// A dataset became active; the window index is back at 0.
    DatasetSwitched(SwitchReport),
    /// The current window moved.
    WindowMoved(WindowTransition),
    /// The view mode flipped.
    ModeChanged(ModeChange),
    /// A page fetch started; sibling controls are now disabled.
    LoadStarted(PageRequest),
    /// A "load more" step ended, with or without a fetch.
    LoadFinished(LoadOutcome),
}

/// Notification delivered to observers after every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// What happened.
    pub cause: ChangeCause,
    /// Interaction state after the change.
    pub view: ViewState,
    /// Control presentation after the change.
    pub affordances: Affordances,
}

/// Receives carousel state changes, typically to trigger a redraw.
pub trait CarouselObserver: Send + Sync {
    /// Handles one state change.
    fn notify(&self, change: &StateChange);
}
