//! The carousel state machine and its single event entry point.
//!
//! [`CarouselController`] owns the [`ViewState`] together with the dataset
//! switchboard, the view-mode controller and the incremental loader. Every
//! user interaction and every page completion enters through
//! [`CarouselController::dispatch`]; renderers learn about the outcome by
//! subscribing a [`CarouselObserver`] and by querying [`Affordances`].
//!
//! Network I/O stays outside: a "load more" dispatch returns the
//! [`PageRequest`] to perform, and the caller feeds the response back as
//! [`CarouselEvent::PageLoaded`].

mod events;

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use serde_json::Value;

pub use events::{CarouselEvent, CarouselObserver, ChangeCause, StateChange};

use super::controls::{Affordances, ControlSet, LoadMoreAffordance};
use super::dataset::{Dataset, DatasetSwitchboard, SwitchReport, today_token};
use super::loader::{
    DEFAULT_LOAD_CEILING, DEFAULT_PAGE_SIZE, IncrementalLoader, LoadOutcome, LoadState,
    PageRequest,
};
use super::view_mode::{ViewMode, ViewModeController, WindowTransition, navigation_visible};
use super::windows::DEFAULT_WINDOW_SIZE;
use crate::catalog::{CatalogError, DatasetKey, InitialPayloads, Movie};

/// Tunables for a carousel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselSettings {
    /// Items per window.
    pub window_size: NonZeroUsize,
    /// Items requested per "load more" page.
    pub page_size: u32,
    /// Items "load more" may fetch per dataset before stopping.
    pub load_ceiling: usize,
    /// Controls present in the host surface.
    pub controls: ControlSet,
    /// Mode the carousel starts in.
    pub initial_mode: ViewMode,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            load_ceiling: DEFAULT_LOAD_CEILING,
            controls: ControlSet::ALL,
            initial_mode: ViewMode::Slide,
        }
    }
}

/// The part of carousel state that changes with user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// Dataset currently shown.
    pub active_dataset: DatasetKey,
    /// Index into the active dataset's windows.
    pub current_window: usize,
    /// Slide or list presentation.
    pub view_mode: ViewMode,
}

/// Owns all carousel state and applies events to it.
pub struct CarouselController {
    settings: CarouselSettings,
    switchboard: DatasetSwitchboard,
    modes: ViewModeController,
    loader: IncrementalLoader,
    current_window: usize,
    payloads: InitialPayloads,
    today: String,
    observers: Vec<Arc<dyn CarouselObserver>>,
}

impl fmt::Debug for CarouselController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselController")
            .field("settings", &self.settings)
            .field("view_state", &self.view_state())
            .field("item_count", &self.switchboard.item_count())
            .field("in_flight", &self.loader.in_flight())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl CarouselController {
    /// Creates a controller showing the `daily` ranking from `payloads`.
    ///
    /// The paged datasets use today's local date as their range string.
    #[must_use]
    pub fn new(settings: CarouselSettings, payloads: InitialPayloads) -> Self {
        Self::with_today(settings, payloads, today_token())
    }

    /// Creates a controller with an explicit date token for the paged
    /// datasets' range string.
    #[must_use]
    pub fn with_today(
        settings: CarouselSettings,
        payloads: InitialPayloads,
        today: impl Into<String>,
    ) -> Self {
        let mut controller = Self {
            settings,
            switchboard: DatasetSwitchboard::new(settings.window_size),
            modes: ViewModeController::new(settings.initial_mode),
            loader: IncrementalLoader::new(settings.page_size, settings.load_ceiling),
            current_window: 0,
            payloads,
            today: today.into(),
            observers: Vec::new(),
        };
        controller.install_initial(DatasetKey::Daily);
        controller
    }

    /// Registers an observer for state changes.
    pub fn subscribe(&mut self, observer: Arc<dyn CarouselObserver>) {
        self.observers.push(observer);
    }

    /// Installs `payload` as `dataset`, replacing any items it had, and makes
    /// it active.
    ///
    /// This is the programmatic switch: unlike a tab selection it is honoured
    /// while a page fetch is running, and that fetch's result will then be
    /// discarded. The dataset's paging progress starts over.
    pub fn switch_to(
        &mut self,
        dataset: DatasetKey,
        payload: Option<&Value>,
        label: &str,
    ) -> SwitchReport {
        let report = self
            .switchboard
            .switch_to(dataset, payload, label, &self.today);
        self.loader.reset(dataset);
        self.current_window = 0;
        self.emit(ChangeCause::DatasetSwitched(report.clone()));
        report
    }

    /// Applies one event and returns the page fetch to perform, if any.
    pub fn dispatch(&mut self, event: CarouselEvent) -> Option<PageRequest> {
        match event {
            CarouselEvent::SelectDataset(dataset) => {
                self.select_dataset(dataset);
                None
            }
            CarouselEvent::Next => {
                self.step_window(true);
                None
            }
            CarouselEvent::Previous => {
                self.step_window(false);
                None
            }
            CarouselEvent::ShowList => {
                self.change_mode(ViewMode::List);
                None
            }
            CarouselEvent::ShowSlides => {
                self.change_mode(ViewMode::Slide);
                None
            }
            CarouselEvent::LoadMore => self.load_more(),
            CarouselEvent::PageLoaded { request, response } => {
                self.page_loaded(&request, response);
                None
            }
        }
    }

    fn accepts_input(&self, present: bool, event: &str) -> bool {
        if !present {
            tracing::debug!("{event} ignored: control not present");
            return false;
        }
        if self.loader.is_busy() {
            tracing::debug!("{event} ignored: page fetch in flight");
            return false;
        }
        true
    }

    fn select_dataset(&mut self, dataset: DatasetKey) {
        if !self.accepts_input(self.settings.controls.dataset_tabs, "dataset selection") {
            return;
        }
        if let Some(report) = self.switchboard.activate(dataset) {
            self.current_window = 0;
            self.emit(ChangeCause::DatasetSwitched(report));
        } else {
            self.install_initial(dataset);
        }
    }

    fn install_initial(&mut self, dataset: DatasetKey) {
        let payload = self.payloads.get(dataset).cloned();
        self.switch_to(dataset, payload.as_ref(), dataset.default_label());
    }

    fn step_window(&mut self, forward: bool) {
        if !self.accepts_input(self.settings.controls.navigation, "window navigation") {
            return;
        }
        if !self.navigation_shown() {
            tracing::debug!("window navigation ignored: navigation hidden");
            return;
        }

        let count = self.switchboard.windows().len();
        let last = count.saturating_sub(1);
        self.current_window = match (forward, self.current_window) {
            (true, current) if current >= last => 0,
            (true, current) => current.saturating_add(1),
            (false, 0) => last,
            (false, current) => current.saturating_sub(1),
        };
        self.emit(ChangeCause::WindowMoved(WindowTransition::Move));
    }

    fn change_mode(&mut self, mode: ViewMode) {
        if !self.accepts_input(self.settings.controls.view_toggles, "view toggle") {
            return;
        }
        if self.modes.mode() == mode {
            return;
        }

        let change = match mode {
            ViewMode::List => self.modes.to_list(),
            ViewMode::Slide => {
                self.clamp_window();
                self.modes.to_slide()
            }
        };
        self.emit(ChangeCause::ModeChanged(change));
    }

    fn load_more(&mut self) -> Option<PageRequest> {
        if !self.accepts_input(self.settings.controls.load_more, "load more") {
            return None;
        }
        let dataset = self.switchboard.active_key();
        if !self.affordances().load_more.enabled {
            tracing::debug!("load more ignored: not available for {dataset}");
            return None;
        }

        match self.loader.begin(dataset, self.switchboard.generation()) {
            Ok(request) => {
                self.emit(ChangeCause::LoadStarted(request));
                Some(request)
            }
            Err(LoadOutcome::Ignored) => None,
            Err(outcome) => {
                self.emit(ChangeCause::LoadFinished(outcome));
                None
            }
        }
    }

    fn page_loaded(&mut self, request: &PageRequest, response: Result<Value, CatalogError>) {
        if self.loader.in_flight() != Some(request) {
            tracing::debug!(
                "ignoring completion for {} page {}: not in flight",
                request.dataset,
                request.page
            );
            return;
        }

        if request.dataset != self.switchboard.active_key()
            || request.generation != self.switchboard.generation()
        {
            tracing::debug!(
                "discarding stale {} page {}: dataset no longer active",
                request.dataset,
                request.page
            );
            let outcome = self.loader.discard(request);
            self.emit(ChangeCause::LoadFinished(outcome));
            return;
        }

        let completion = self.loader.complete(request, response);
        if !completion.items.is_empty() {
            self.switchboard.append_to_active(completion.items);
            self.clamp_window();
        }
        self.emit(ChangeCause::LoadFinished(completion.outcome));
    }

    fn clamp_window(&mut self) {
        let last = self.switchboard.windows().len().saturating_sub(1);
        if self.current_window > last {
            self.current_window = 0;
        }
    }

    fn navigation_shown(&self) -> bool {
        self.settings.controls.navigation
            && navigation_visible(
                self.modes.mode(),
                self.switchboard.item_count(),
                self.switchboard.window_size().get(),
            )
    }

    fn emit(&self, cause: ChangeCause) {
        if self.observers.is_empty() {
            return;
        }
        let change = StateChange {
            cause,
            view: self.view_state(),
            affordances: self.affordances(),
        };
        for observer in &self.observers {
            observer.notify(&change);
        }
    }

    /// Returns the interaction state.
    #[must_use]
    pub const fn view_state(&self) -> ViewState {
        ViewState {
            active_dataset: self.switchboard.active_key(),
            current_window: self.current_window,
            view_mode: self.modes.mode(),
        }
    }

    /// Returns the current window index.
    #[must_use]
    pub const fn current_window(&self) -> usize {
        self.current_window
    }

    /// Returns the active dataset, if installed.
    #[must_use]
    pub fn active_dataset(&self) -> Option<&Dataset> {
        self.switchboard.active_dataset()
    }

    /// Returns the switchboard for read access to datasets and windows.
    #[must_use]
    pub const fn switchboard(&self) -> &DatasetSwitchboard {
        &self.switchboard
    }

    /// Returns every loaded item of the active dataset.
    #[must_use]
    pub fn items(&self) -> &[Movie] {
        self.switchboard.items()
    }

    /// Returns the items the renderer should draw.
    ///
    /// Slide mode shows the current window; list mode shows everything.
    #[must_use]
    pub fn visible_items(&self) -> &[Movie] {
        let items = self.switchboard.items();
        match self.modes.mode() {
            ViewMode::List => items,
            ViewMode::Slide => self
                .switchboard
                .windows()
                .window(self.current_window)
                .and_then(|range| items.get(range))
                .unwrap_or(&[]),
        }
    }

    /// Returns the index of the first item in the current window.
    #[must_use]
    pub fn window_offset(&self) -> usize {
        self.switchboard
            .windows()
            .offset_of(self.current_window)
            .unwrap_or_default()
    }

    /// Returns the number of windows for the active dataset.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.switchboard.windows().len()
    }

    /// Returns the paging state of a dataset; `None` for `daily`.
    #[must_use]
    pub const fn load_state(&self, dataset: DatasetKey) -> Option<&LoadState> {
        self.loader.state(dataset)
    }

    /// Returns true while a page fetch is outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.loader.is_busy()
    }

    /// Returns the page fetch currently outstanding.
    #[must_use]
    pub const fn in_flight(&self) -> Option<&PageRequest> {
        self.loader.in_flight()
    }

    /// Returns the settings the controller was built with.
    #[must_use]
    pub const fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    /// Derives what the renderer should show for each control.
    #[must_use]
    pub fn affordances(&self) -> Affordances {
        let busy = self.loader.is_busy();
        let mode = self.modes.mode();
        let dataset = self.switchboard.active_key();
        let controls = self.settings.controls;

        Affordances {
            navigation_visible: self.navigation_shown(),
            controls_enabled: !busy,
            view_mode: mode,
            layout: self.modes.layout(),
            active_tab: controls.dataset_tabs.then_some(dataset),
            load_more: LoadMoreAffordance::derive(
                mode,
                dataset,
                self.loader.state(dataset).map(LoadState::status),
                controls.load_more,
                busy,
            ),
        }
    }
}

#[cfg(test)]
mod tests;
