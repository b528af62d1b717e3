//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.marquee.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `MARQUEE_API_BASE_URL`,
//!    `MARQUEE_WINDOW_SIZE`, and so on
//! 4. **Command-line arguments** – `--api-base-url`/`-u`, `--window-size`/`-w`
//!
//! # Configuration File
//!
//! ```toml
//! api_base_url = "http://localhost:8080/"
//! window_size = 4
//! page_size = 20
//! load_ceiling = 150
//! request_timeout_secs = 10
//! start_in_list_view = false
//! ```

use std::num::NonZeroUsize;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::carousel::{
    CarouselSettings, ControlSet, DEFAULT_LOAD_CEILING, DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_SIZE,
    ViewMode,
};
use crate::catalog::{CatalogError, HttpCatalogGatewayConfig};

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Browse the box-office carousel in the terminal.
    Carousel,
    /// Print catalog matches for a title.
    Search,
    /// Print the detail record of one movie.
    MovieDetail,
}

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use marquee::MarqueeConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = MarqueeConfig::load().expect("failed to load configuration");
/// let settings = config.carousel_settings().expect("invalid carousel settings");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "MARQUEE",
    discovery(
        dotfile_name = ".marquee.toml",
        config_file_name = "marquee.toml",
        app_name = "marquee"
    )
)]
pub struct MarqueeConfig {
    /// Base URL of the catalog service.
    ///
    /// Can be provided via:
    /// - CLI: `--api-base-url <URL>` or `-u <URL>`
    /// - Environment: `MARQUEE_API_BASE_URL`
    /// - Config file: `api_base_url = "..."`
    #[ortho_config(cli_short = 'u')]
    pub api_base_url: String,

    /// Number of cards shown per slide window. Must be at least 1.
    #[ortho_config(cli_short = 'w')]
    pub window_size: usize,

    /// Items requested per "load more" page, and for the first page.
    #[ortho_config(cli_short = 'p')]
    pub page_size: u32,

    /// Items "load more" may fetch per dataset before the control reads
    /// "Last page".
    #[ortho_config(cli_short = 'c')]
    pub load_ceiling: usize,

    /// HTTP timeout for catalog requests, in seconds. Must be at least 1.
    #[ortho_config()]
    pub request_timeout_secs: u64,

    /// Starts in list view instead of slide view.
    ///
    /// Can be provided via:
    /// - CLI: `--start-in-list-view` / `-l`
    /// - Config file: `start_in_list_view = true`
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so `MARQUEE_START_IN_LIST_VIEW` has no effect.
    #[ortho_config(cli_short = 'l')]
    pub start_in_list_view: bool,

    /// Writes page-load telemetry to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry_jsonl: bool,

    /// Title to search for instead of opening the carousel.
    ///
    /// Can be provided via:
    /// - CLI: `--search <TITLE>` or `-s <TITLE>`
    /// - Environment: `MARQUEE_SEARCH`
    #[ortho_config(cli_short = 's')]
    pub search: Option<String>,

    /// Movie to describe instead of opening the carousel.
    ///
    /// Can be provided via:
    /// - CLI: `--movie-id <ID>` or `-m <ID>`
    /// - Environment: `MARQUEE_MOVIE_ID`
    #[ortho_config(cli_short = 'm')]
    pub movie_id: Option<u64>,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            window_size: DEFAULT_WINDOW_SIZE.get(),
            page_size: DEFAULT_PAGE_SIZE,
            load_ceiling: DEFAULT_LOAD_CEILING,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            start_in_list_view: false,
            telemetry_jsonl: false,
            search: None,
            movie_id: None,
        }
    }
}

impl MarqueeConfig {
    /// Determines the operation mode based on provided configuration.
    ///
    /// A movie id wins over a search title; with neither, the carousel opens.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.movie_id.is_some() {
            OperationMode::MovieDetail
        } else if self.search.is_some() {
            OperationMode::Search
        } else {
            OperationMode::Carousel
        }
    }

    /// Returns the search title or an error if missing or blank.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when no title is configured.
    pub fn require_search(&self) -> Result<&str, CatalogError> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .ok_or_else(|| CatalogError::Configuration {
                message: "search title is required (use --search or -s)".to_owned(),
            })
    }

    /// Validates the carousel tunables.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when the window size or page
    /// size is zero.
    pub fn carousel_settings(&self) -> Result<CarouselSettings, CatalogError> {
        let window_size =
            NonZeroUsize::new(self.window_size).ok_or_else(|| CatalogError::Configuration {
                message: "window size must be at least 1 (use --window-size or -w)".to_owned(),
            })?;
        if self.page_size == 0 {
            return Err(CatalogError::Configuration {
                message: "page size must be at least 1 (use --page-size or -p)".to_owned(),
            });
        }

        Ok(CarouselSettings {
            window_size,
            page_size: self.page_size,
            load_ceiling: self.load_ceiling,
            controls: ControlSet::ALL,
            initial_mode: if self.start_in_list_view {
                ViewMode::List
            } else {
                ViewMode::Slide
            },
        })
    }

    /// Parses the catalog location and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] when the base URL does not parse,
    /// or [`CatalogError::Configuration`] when the timeout is zero.
    pub fn gateway_config(&self) -> Result<HttpCatalogGatewayConfig, CatalogError> {
        let base_url = Url::parse(self.api_base_url.trim())
            .map_err(|error| CatalogError::InvalidUrl(format!("{}: {error}", self.api_base_url)))?;
        if self.request_timeout_secs == 0 {
            return Err(CatalogError::Configuration {
                message: "request timeout must be at least 1 second".to_owned(),
            });
        }

        Ok(HttpCatalogGatewayConfig::new(base_url)
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_initial_page_size(self.page_size))
    }

    /// Validates every setting without building anything.
    ///
    /// # Errors
    ///
    /// Returns the first problem found by [`Self::carousel_settings`] or
    /// [`Self::gateway_config`].
    pub fn validate(&self) -> Result<(), CatalogError> {
        self.carousel_settings()?;
        self.gateway_config()?;
        Ok(())
    }
}
