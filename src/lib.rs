//! Marquee library crate providing a paged box-office movie carousel.
//!
//! The library fetches the daily box-office chart and the now-playing and
//! upcoming listings from a catalog service, slices them into fixed-size
//! windows, and drives a terminal carousel that can page through those
//! windows, switch between a slide and a list view, and append further
//! catalog pages on demand up to a load ceiling.

pub mod carousel;
pub mod catalog;
pub mod config;
pub mod telemetry;
pub mod tui;

pub use carousel::{
    CarouselController, CarouselEvent, CarouselObserver, CarouselSettings, ChangeCause,
    DatasetSwitchboard, IncrementalLoader, ViewMode, ViewModeController, ViewState, WindowSet,
};
pub use catalog::{
    CatalogError, CatalogGateway, DatasetKey, HttpCatalogGateway, HttpCatalogGatewayConfig,
    InitialPayloads, Movie,
};
pub use config::{MarqueeConfig, OperationMode};
