//! Windowed carousel over three catalog datasets.
//!
//! The pieces stack from the bottom up: [`windows`] partitions an item count
//! into display windows, [`dataset`] normalises payloads and keeps one
//! dataset active, [`view_mode`] flips between slide and list presentation,
//! [`loader`] pages more items in, and [`controller`] ties them together
//! behind a single event entry point.

pub mod controller;
pub mod controls;
pub mod dataset;
pub mod loader;
pub mod view_mode;
pub mod windows;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use controller::{
    CarouselController, CarouselEvent, CarouselObserver, CarouselSettings, ChangeCause,
    StateChange, ViewState,
};
pub use controls::{Affordances, ControlSet, LoadMoreAffordance, LoadMoreLabel};
pub use dataset::{
    Dataset, DatasetSwitchboard, NormalizationError, Normalized, SwitchReport, normalize_payload,
    today_token,
};
pub use loader::{
    DEFAULT_LOAD_CEILING, DEFAULT_PAGE_SIZE, IncrementalLoader, LoadOutcome, LoadState,
    LoadStatus, PageCompletion, PageRequest,
};
pub use view_mode::{Layout, ModeChange, ViewMode, ViewModeController, WindowTransition};
pub use windows::{DEFAULT_WINDOW_SIZE, WindowSet, compute_windows};
