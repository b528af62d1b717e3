//! TUI mode for browsing the box-office carousel.
//!
//! This module provides the entry point for the interactive terminal user
//! interface that pages through the daily chart and the two paged listings.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;
use crossterm::terminal;

use marquee::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};
use marquee::tui::{
    BoxofficeApp, set_carousel_settings, set_catalog_gateway, set_initial_payloads,
    set_initial_terminal_size, set_telemetry_sink,
};
use marquee::{CatalogError, InitialPayloads, MarqueeConfig};

use super::build_gateway;

/// Runs the TUI mode for browsing the carousel.
///
/// # Errors
///
/// Returns an error if:
/// - The carousel or gateway settings are invalid
/// - The TUI fails to initialise
pub async fn run(config: &MarqueeConfig) -> Result<(), CatalogError> {
    let settings = config.carousel_settings()?;
    let gateway = Arc::new(build_gateway(config)?);

    // Missing datasets degrade to empty ones; the carousel still opens.
    let payloads = InitialPayloads::fetch(gateway.as_ref()).await;

    // Store start-up state for Model::init() to retrieve. Each setter is a
    // no-op if the value was already stored in this process.
    let _ = set_initial_payloads(payloads);
    let _ = set_carousel_settings(settings);
    let _ = set_catalog_gateway(gateway);
    let _ = set_telemetry_sink(telemetry_sink(config));

    if let Ok((width, height)) = terminal::size() {
        let _ = set_initial_terminal_size(width, height);
    }

    run_tui().await.map_err(|error| CatalogError::Io {
        message: format!("TUI error: {error}"),
    })
}

fn telemetry_sink(config: &MarqueeConfig) -> Arc<dyn TelemetrySink> {
    if config.telemetry_jsonl {
        Arc::new(StderrJsonlTelemetrySink)
    } else {
        Arc::new(NoopTelemetrySink)
    }
}

/// Runs the bubbletea-rs program with the `BoxofficeApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    // BoxofficeApp::init() will retrieve data from module-level storage.
    let program = Program::<BoxofficeApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    io::stdout().flush().ok();

    Ok(())
}
