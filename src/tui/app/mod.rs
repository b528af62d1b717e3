//! Main TUI application model implementing the MVU pattern.
//!
//! This module provides the application state and update logic for the
//! box-office carousel. The carousel controller owns all carousel state; the
//! app translates messages into controller events, turns the page requests it
//! returns into async commands, and renders from the controller's queries.
//!
//! # Module Structure
//!
//! - `load_handlers`: "load more" commands and page completions
//! - `model_impl`: the `bubbletea_rs::Model` implementation
//! - `rendering`: View rendering methods for terminal output
//! - `status`: observer that turns state changes into a status line

use std::sync::Arc;

use bubbletea_rs::Cmd;

use crate::carousel::{
    CarouselController, CarouselEvent, CarouselSettings, ViewMode, ViewState,
};
use crate::catalog::InitialPayloads;

use super::messages::AppMsg;

mod load_handlers;
mod model_impl;
mod rendering;
mod status;

use status::StatusLine;

/// Rows used by everything except the card area: header, tabs, blank line,
/// footer and status line.
const CHROME_HEIGHT: u16 = 5;

/// Main application model for the box-office TUI.
#[derive(Debug)]
pub struct BoxofficeApp {
    /// Carousel state machine.
    controller: CarouselController,
    /// Last notable carousel event, shown under the footer.
    status: Arc<StatusLine>,
    /// First visible row in list view.
    list_scroll: usize,
    /// Terminal dimensions.
    width: u16,
    height: u16,
    /// Whether help overlay is visible.
    pub(crate) show_help: bool,
}

impl BoxofficeApp {
    /// Creates an application over the given payloads.
    #[must_use]
    pub fn new(settings: CarouselSettings, payloads: InitialPayloads) -> Self {
        Self::from_controller(CarouselController::new(settings, payloads))
    }

    /// Creates an application around an existing controller.
    #[must_use]
    pub fn from_controller(mut controller: CarouselController) -> Self {
        let status = Arc::new(StatusLine::default());
        controller.subscribe(status.clone());
        let (width, height) = crate::tui::storage::get_initial_terminal_size();
        Self {
            controller,
            status,
            list_scroll: 0,
            width,
            height,
            show_help: false,
        }
    }

    /// Creates an application with no data.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(CarouselSettings::default(), InitialPayloads::new())
    }

    /// Returns the carousel controller.
    #[must_use]
    pub const fn controller(&self) -> &CarouselController {
        &self.controller
    }

    /// Returns the carousel interaction state.
    #[must_use]
    pub const fn view_state(&self) -> ViewState {
        self.controller.view_state()
    }

    /// Returns the current status line, if any.
    #[must_use]
    pub fn status_message(&self) -> Option<String> {
        self.status.current()
    }

    /// Handles a message and updates state accordingly.
    ///
    /// Delegates to specialised handlers for each message category.
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_carousel() {
            return self.handle_carousel_msg(msg);
        }
        if msg.is_scroll() {
            return self.handle_scroll_msg(msg);
        }
        self.handle_lifecycle_msg(msg)
    }

    /// Dispatches carousel messages to the controller.
    fn handle_carousel_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        let event = match msg {
            AppMsg::SelectDataset(dataset) => CarouselEvent::SelectDataset(*dataset),
            AppMsg::NextWindow => CarouselEvent::Next,
            AppMsg::PreviousWindow => CarouselEvent::Previous,
            AppMsg::ShowSlides => CarouselEvent::ShowSlides,
            AppMsg::ShowList => CarouselEvent::ShowList,
            AppMsg::ToggleViewMode => match self.controller.view_state().view_mode {
                ViewMode::Slide => CarouselEvent::ShowList,
                ViewMode::List => CarouselEvent::ShowSlides,
            },
            AppMsg::LoadMore => CarouselEvent::LoadMore,
            AppMsg::PageFetched {
                request,
                response,
                latency_ms,
            } => return self.handle_page_fetched(request, response, *latency_ms),
            _ => {
                debug_assert!(false, "non-carousel message routed to handle_carousel_msg");
                return None;
            }
        };

        let before = self.controller.view_state();
        let request = self.controller.dispatch(event);
        if self.controller.view_state().active_dataset != before.active_dataset {
            self.list_scroll = 0;
        }
        request.map(Self::fetch_page_cmd)
    }

    /// Scrolls the list view.
    fn handle_scroll_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if self.controller.view_state().view_mode != ViewMode::List {
            return None;
        }
        match msg {
            AppMsg::ScrollUp => self.list_scroll = self.list_scroll.saturating_sub(1),
            AppMsg::ScrollDown => {
                let last = self.controller.items().len().saturating_sub(1);
                self.list_scroll = self.list_scroll.saturating_add(1).min(last);
            }
            _ => debug_assert!(false, "non-scroll message routed to handle_scroll_msg"),
        }
        None
    }

    /// Dispatches lifecycle and window messages to their handlers.
    fn handle_lifecycle_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            AppMsg::WindowResized { width, height } => {
                self.width = *width;
                self.height = *height;
                None
            }
            AppMsg::Initialized => None,
            _ => {
                debug_assert!(
                    false,
                    "non-lifecycle message routed to handle_lifecycle_msg"
                );
                None
            }
        }
    }

    /// Rows available for cards or list entries.
    const fn body_height(&self) -> usize {
        self.height.saturating_sub(CHROME_HEIGHT) as usize
    }
}
