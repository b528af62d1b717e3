//! Gateways for loading catalog data over HTTP.
//!
//! The trait-based design enables mocking in tests while
//! [`HttpCatalogGateway`] handles real requests with reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::error::CatalogError;
use super::models::{DatasetKey, Movie};

pub use super::intake::InitialPayloads;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_INITIAL_PAGE_SIZE: u32 = 20;
const ERROR_BODY_PREVIEW_CHARS: usize = 160;

/// Gateway that can load catalog data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Fetch the raw payload a dataset starts with.
    ///
    /// For paged datasets this is page 0; the daily ranking has no pages.
    async fn initial_payload(&self, dataset: DatasetKey) -> Result<Value, CatalogError>;

    /// Fetch one page of a paged dataset as a raw JSON value.
    ///
    /// The body is returned untouched so the caller can decide whether an
    /// unexpected shape means "no more data".
    async fn movie_page(
        &self,
        dataset: DatasetKey,
        page: u32,
        size: u32,
    ) -> Result<Value, CatalogError>;

    /// Fetch the detail record for a single movie.
    async fn movie_detail(&self, id: u64) -> Result<Movie, CatalogError>;

    /// Search the catalog by title.
    async fn search_movies(&self, title: &str) -> Result<Vec<Movie>, CatalogError>;
}

/// Configuration for [`HttpCatalogGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCatalogGatewayConfig {
    /// Base URL of the catalog service (e.g. `http://localhost:8080/`).
    pub base_url: Url,
    /// HTTP timeout applied to every request.
    pub timeout: Duration,
    /// Page size used when fetching page 0 of a paged dataset.
    pub initial_page_size: u32,
}

impl HttpCatalogGatewayConfig {
    /// Creates configuration for the given base URL with default timeout and
    /// initial page size.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            initial_page_size: DEFAULT_INITIAL_PAGE_SIZE,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the page size used for page 0.
    #[must_use]
    pub const fn with_initial_page_size(mut self, initial_page_size: u32) -> Self {
        self.initial_page_size = initial_page_size;
        self
    }
}

/// reqwest-backed catalog gateway.
#[derive(Debug, Clone)]
pub struct HttpCatalogGateway {
    client: Client,
    base_url: Url,
    initial_page_size: u32,
}

impl HttpCatalogGateway {
    /// Builds a gateway from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] when the base URL cannot carry
    /// relative paths, or [`CatalogError::Configuration`] when the HTTP client
    /// cannot be constructed.
    pub fn new(config: HttpCatalogGatewayConfig) -> Result<Self, CatalogError> {
        let base_url = directory_url(config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| CatalogError::Configuration {
                message: format!("failed to configure catalog HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            base_url,
            initial_page_size: config.initial_page_size,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        self.base_url
            .join(path)
            .map_err(|error| CatalogError::InvalidUrl(format!("{path}: {error}")))
    }

    fn page_url(&self, dataset: DatasetKey, page: u32, size: u32) -> Result<Url, CatalogError> {
        let path = listing_path(dataset).ok_or_else(|| CatalogError::Configuration {
            message: format!("dataset '{dataset}' is not paged"),
        })?;
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut()
            .append_pair("page", page.to_string().as_str())
            .append_pair("size", size.to_string().as_str());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|error| CatalogError::Network {
                message: format!("GET {url} failed: {error}"),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.map_or_else(
                |_| "(failed to read error response body)".to_owned(),
                |content| truncate_for_message(content.as_str(), ERROR_BODY_PREVIEW_CHARS),
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|error| CatalogError::Decode {
                message: format!("GET {url}: {error}"),
            })
    }
}

#[async_trait]
impl CatalogGateway for HttpCatalogGateway {
    async fn initial_payload(&self, dataset: DatasetKey) -> Result<Value, CatalogError> {
        let url = match dataset {
            DatasetKey::Daily => self.endpoint("movie/boxoffice/daily")?,
            DatasetKey::NowPlaying | DatasetKey::Upcoming => {
                self.page_url(dataset, 0, self.initial_page_size)?
            }
        };
        self.get_json(url).await
    }

    async fn movie_page(
        &self,
        dataset: DatasetKey,
        page: u32,
        size: u32,
    ) -> Result<Value, CatalogError> {
        let url = self.page_url(dataset, page, size)?;
        self.get_json(url).await
    }

    async fn movie_detail(&self, id: u64) -> Result<Movie, CatalogError> {
        let url = self.endpoint(format!("api/movie/{id}").as_str())?;
        self.get_json(url).await
    }

    async fn search_movies(&self, title: &str) -> Result<Vec<Movie>, CatalogError> {
        let mut url = self.endpoint("movie/search")?;
        url.query_pairs_mut().append_pair("title", title);
        self.get_json(url).await
    }
}

const fn listing_path(dataset: DatasetKey) -> Option<&'static str> {
    match dataset {
        DatasetKey::Daily => None,
        DatasetKey::NowPlaying => Some("movie/now-playing"),
        DatasetKey::Upcoming => Some("movie/upcoming"),
    }
}

/// Ensures the base URL ends in `/` so relative joins append to its path.
fn directory_url(mut base_url: Url) -> Result<Url, CatalogError> {
    if base_url.cannot_be_a_base() {
        return Err(CatalogError::InvalidUrl(format!(
            "{base_url} cannot be used as an API base"
        )));
    }

    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(path.as_str());
    }
    Ok(base_url)
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}
