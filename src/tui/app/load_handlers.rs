//! "Load more" commands and page completion handling.

use std::any::Any;
use std::time::Instant;

use bubbletea_rs::Cmd;
use serde_json::Value;

use super::BoxofficeApp;
use crate::carousel::{CarouselEvent, PageRequest};
use crate::catalog::CatalogError;
use crate::tui::messages::AppMsg;

impl BoxofficeApp {
    /// Creates a command that performs `request` and reports back with
    /// [`AppMsg::PageFetched`].
    pub(super) fn fetch_page_cmd(request: PageRequest) -> Cmd {
        Box::pin(async move {
            let start = Instant::now();
            let response = crate::tui::storage::fetch_page(request).await;
            #[expect(
                clippy::cast_possible_truncation,
                reason = "Latency over u64::MAX milliseconds is unrealistic"
            )]
            let latency_ms = start.elapsed().as_millis() as u64;
            Some(Box::new(AppMsg::PageFetched {
                request,
                response,
                latency_ms,
            }) as Box<dyn Any + Send>)
        })
    }

    /// Records telemetry for a finished fetch and hands it to the controller.
    #[expect(
        clippy::unnecessary_wraps,
        reason = "Returns Option<Cmd> for consistency with other message handlers"
    )]
    pub(super) fn handle_page_fetched(
        &mut self,
        request: &PageRequest,
        response: &Result<Value, CatalogError>,
        latency_ms: u64,
    ) -> Option<Cmd> {
        crate::tui::storage::record_page_telemetry(request, response, latency_ms);
        let follow_up = self.controller.dispatch(CarouselEvent::PageLoaded {
            request: *request,
            response: response.clone(),
        });
        debug_assert!(follow_up.is_none(), "page completions never start a fetch");
        None
    }
}
