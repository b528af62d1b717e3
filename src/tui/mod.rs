//! Terminal User Interface for browsing the box-office carousel.
//!
//! This module renders the carousel in a terminal using the bubbletea-rs
//! framework. The TUI is a consumer of [`crate::carousel`]: it forwards key
//! presses as carousel events, performs the page fetches the controller asks
//! for, and draws whatever the controller reports.
//!
//! # Architecture
//!
//! The TUI follows the Model-View-Update (MVU) pattern:
//!
//! - **Model**: Application state in [`app::BoxofficeApp`]
//! - **View**: Rendering logic in the app and its components
//! - **Update**: Message-driven state transitions in `update()`
//!
//! # Initial Data Loading
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, we use a module-level storage pattern for initial data. Call
//! [`set_initial_payloads`], [`set_carousel_settings`] and
//! [`set_catalog_gateway`] before starting the program, and
//! `BoxofficeApp::init()` will retrieve them.

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
mod storage;

pub use app::BoxofficeApp;
pub use storage::{
    set_carousel_settings, set_catalog_gateway, set_initial_payloads, set_initial_terminal_size,
    set_telemetry_sink,
};
