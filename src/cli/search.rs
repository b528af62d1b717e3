//! Title search operation.

use marquee::{CatalogError, CatalogGateway, MarqueeConfig};

use super::build_gateway;
use super::output::write_search_results;

/// Searches the catalog for a title and prints the matches.
///
/// # Errors
///
/// Returns [`CatalogError::Configuration`] if no title is configured.
/// Returns the gateway error if the catalog request fails.
pub async fn run(config: &MarqueeConfig) -> Result<(), CatalogError> {
    let title = config.require_search()?;
    let gateway = build_gateway(config)?;
    let movies = gateway.search_movies(title).await?;

    write_search_results(title, &movies)
}
