//! Single movie lookup operation.

use marquee::{CatalogError, CatalogGateway, MarqueeConfig};

use super::build_gateway;
use super::output::write_movie_detail;

/// Loads one movie by identifier and prints its detail record.
///
/// # Errors
///
/// Returns [`CatalogError::Configuration`] if no movie id is configured.
/// Returns the gateway error if the catalog request fails.
pub async fn run(config: &MarqueeConfig) -> Result<(), CatalogError> {
    let id = config.movie_id.ok_or_else(|| CatalogError::Configuration {
        message: "movie id is required (use --movie-id or -m)".to_owned(),
    })?;
    let gateway = build_gateway(config)?;
    let movie = gateway.movie_detail(id).await?;

    write_movie_detail(&movie)
}
