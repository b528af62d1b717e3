//! Remote movie catalog access.
//!
//! This module is the boundary to the catalog service that feeds the
//! box-office carousel. It fetches the three initial dataset payloads, pages
//! of the two paged datasets, single movie details and title searches. Raw
//! JSON payloads are returned untouched where the carousel owns their
//! normalisation; typed results are returned where the catalog shape is
//! uniform.

pub mod error;
pub mod gateway;
mod intake;
pub mod models;

pub use error::CatalogError;
pub use gateway::{CatalogGateway, HttpCatalogGateway, HttpCatalogGatewayConfig, InitialPayloads};
pub use models::{DatasetKey, Movie};

#[cfg(test)]
pub use gateway::MockCatalogGateway;
