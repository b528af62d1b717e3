//! Marquee CLI entrypoint for the box-office carousel.

use std::io::{self, Write};
use std::process::ExitCode;

use marquee::{CatalogError, MarqueeConfig, OperationMode};
use ortho_config::OrthoConfig;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CatalogError> {
    let config = load_config()?;
    config.validate()?;

    match config.operation_mode() {
        OperationMode::Carousel => cli::boxoffice_tui::run(&config).await,
        OperationMode::Search => cli::search::run(&config).await,
        OperationMode::MovieDetail => cli::movie_detail::run(&config).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`CatalogError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<MarqueeConfig, CatalogError> {
    MarqueeConfig::load().map_err(|error| CatalogError::Configuration {
        message: error.to_string(),
    })
}
