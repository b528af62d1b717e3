//! Startup context storage and page-fetch helpers for the box-office TUI.
//!
//! This module owns the global `OnceLock` values used during TUI bootstrapping
//! and provides the setter/getter functions consumed by CLI wiring and app
//! handlers.

use std::sync::{Arc, OnceLock};

use crossterm::terminal;
use serde_json::Value;

use crate::carousel::{CarouselSettings, PageRequest};
use crate::catalog::{CatalogError, CatalogGateway, InitialPayloads};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Global storage for the payloads each dataset starts with.
///
/// This is set before the TUI program starts and read by `BoxofficeApp::init()`.
static INITIAL_PAYLOADS: OnceLock<InitialPayloads> = OnceLock::new();

/// Global storage for carousel tunables.
static CAROUSEL_SETTINGS: OnceLock<CarouselSettings> = OnceLock::new();

/// Global storage for initial terminal dimensions.
static INITIAL_TERMINAL_SIZE: OnceLock<(u16, u16)> = OnceLock::new();

/// Global storage for the gateway used by "load more".
static CATALOG_GATEWAY: OnceLock<Arc<dyn CatalogGateway>> = OnceLock::new();

/// Global storage for telemetry sink.
static TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Static fallback telemetry sink to avoid allocations on each call.
static DEFAULT_TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Sets the initial dataset payloads for the TUI application.
///
/// This must be called before starting the bubbletea-rs program. The payloads
/// will be read by `BoxofficeApp::init()` when the program starts.
///
/// # Returns
///
/// `true` if the payloads were set, `false` if they were already set.
pub fn set_initial_payloads(payloads: InitialPayloads) -> bool {
    INITIAL_PAYLOADS.set(payloads).is_ok()
}

/// Sets the carousel settings for the TUI application.
///
/// Without this, defaults are used.
///
/// # Returns
///
/// `true` if the settings were set, `false` if they were already set.
pub fn set_carousel_settings(settings: CarouselSettings) -> bool {
    CAROUSEL_SETTINGS.set(settings).is_ok()
}

/// Sets the initial terminal dimensions for the TUI application.
///
/// # Returns
///
/// `true` if the dimensions were set, `false` if they were already set.
pub fn set_initial_terminal_size(width: u16, height: u16) -> bool {
    INITIAL_TERMINAL_SIZE.set((width, height)).is_ok()
}

/// Sets the catalog gateway used to fetch further pages.
///
/// Without a gateway, every "load more" fails and the control is hidden.
///
/// # Returns
///
/// `true` if the gateway was set, `false` if it was already set.
pub fn set_catalog_gateway(gateway: Arc<dyn CatalogGateway>) -> bool {
    CATALOG_GATEWAY.set(gateway).is_ok()
}

/// Sets the telemetry sink for the TUI application.
///
/// Without this, a no-op sink is used.
///
/// # Returns
///
/// `true` if the sink was set, `false` if it was already set.
pub fn set_telemetry_sink(sink: Arc<dyn TelemetrySink>) -> bool {
    TELEMETRY_SINK.set(sink).is_ok()
}

/// Gets a clone of the initial payloads from storage.
///
/// Returns empty payloads if none were set; every dataset then starts empty.
pub(crate) fn get_initial_payloads() -> InitialPayloads {
    INITIAL_PAYLOADS.get().cloned().unwrap_or_default()
}

/// Gets the carousel settings, or defaults if none were set.
pub(crate) fn get_carousel_settings() -> CarouselSettings {
    CAROUSEL_SETTINGS.get().copied().unwrap_or_default()
}

/// Gets the initial terminal dimensions from storage.
///
/// Falls back to the live terminal size, then to 80x24.
pub(crate) fn get_initial_terminal_size() -> (u16, u16) {
    const DEFAULT_WIDTH: u16 = 80;
    const DEFAULT_HEIGHT: u16 = 24;

    INITIAL_TERMINAL_SIZE
        .get()
        .copied()
        .filter(|(width, height)| *width > 0 && *height > 0)
        .or_else(|| {
            terminal::size()
                .ok()
                .filter(|(width, height)| *width > 0 && *height > 0)
        })
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}

fn get_telemetry_sink() -> Arc<dyn TelemetrySink> {
    TELEMETRY_SINK.get().cloned().unwrap_or_else(|| {
        Arc::clone(DEFAULT_TELEMETRY_SINK.get_or_init(|| Arc::new(NoopTelemetrySink)))
    })
}

/// Records the outcome of a page fetch.
pub(crate) fn record_page_telemetry(
    request: &PageRequest,
    response: &Result<Value, CatalogError>,
    latency_ms: u64,
) {
    let event = match response {
        Ok(body) => TelemetryEvent::PageLoaded {
            dataset: request.dataset,
            page: request.page,
            item_count: page_len(body),
            latency_ms,
        },
        Err(error) => TelemetryEvent::PageLoadFailed {
            dataset: request.dataset,
            page: request.page,
            message: error.to_string(),
        },
    };
    get_telemetry_sink().record(event);
}

/// Counts the raw entries in a page body, bare or enveloped.
fn page_len(body: &Value) -> usize {
    body.as_array()
        .or_else(|| body.get("content").and_then(Value::as_array))
        .map_or(0, Vec::len)
}

/// Fetches one page through the configured gateway.
///
/// Returns a configuration error if no gateway was set.
pub(crate) async fn fetch_page(request: PageRequest) -> Result<Value, CatalogError> {
    let gateway = CATALOG_GATEWAY
        .get()
        .ok_or_else(|| CatalogError::Configuration {
            message: "catalog gateway not configured".to_owned(),
        })?;
    gateway
        .movie_page(request.dataset, request.page, request.size)
        .await
}
