//! CLI operation mode handlers.
//!
//! This module contains the implementations for different operation modes:
//! - [`boxoffice_tui`]: Interactive box-office carousel
//! - [`movie_detail`]: Print a single catalog entry
//! - [`search`]: Print catalog matches for a title
//!
//! Output formatting utilities are in [`output`].

use marquee::{CatalogError, HttpCatalogGateway, MarqueeConfig};

pub mod boxoffice_tui;
pub mod movie_detail;
pub mod output;
pub mod search;

/// Builds the HTTP catalog gateway described by the configuration.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidUrl`] or [`CatalogError::Configuration`]
/// when the gateway settings are unusable.
pub fn build_gateway(config: &MarqueeConfig) -> Result<HttpCatalogGateway, CatalogError> {
    HttpCatalogGateway::new(config.gateway_config()?)
}
