//! Scenario state and catalog server helpers for the carousel paging BDD
//! tests.

use std::time::Duration;

use marquee::carousel::PageRequest;
use marquee::carousel::test_support::{daily_payload, paged_payload};
use marquee::{CarouselController, HttpCatalogGateway, HttpCatalogGatewayConfig};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::Value;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::runtime::{ScenarioRuntime, start_catalog};

pub(crate) type StepResult = Result<(), Box<dyn std::error::Error>>;

#[derive(ScenarioState, Default)]
pub(crate) struct CarouselState {
    pub(crate) runtime: Slot<ScenarioRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) gateway: Slot<HttpCatalogGateway>,
    pub(crate) controller: Slot<CarouselController>,
    pub(crate) pending: Slot<Option<PageRequest>>,
}

/// Returns the scenario runtime, starting it and the catalog server on first
/// use.
pub(crate) fn runtime_and_server(
    state: &CarouselState,
) -> Result<ScenarioRuntime, Box<dyn std::error::Error>> {
    Ok(start_catalog(&state.runtime, &state.server)?)
}

/// Mounts a JSON response for `GET {route}` with optional page query.
pub(crate) fn mount(
    state: &CarouselState,
    route: &str,
    page: Option<u32>,
    response: ResponseTemplate,
) -> StepResult {
    let runtime = runtime_and_server(state)?;
    let mut mock = Mock::given(method("GET")).and(path(route));
    if let Some(page_number) = page {
        mock = mock.and(query_param("page", page_number.to_string()));
    }
    let builder = mock.respond_with(response);

    state
        .server
        .with_ref(|server| runtime.block_on(builder.mount(server)))
        .ok_or("mock server not initialised")?;
    Ok(())
}

/// Mounts a page of `count` movies for a listing route.
pub(crate) fn mount_page(
    state: &CarouselState,
    route: &str,
    page: u32,
    first_id: u64,
    count: u64,
) -> StepResult {
    let body = paged_payload(first_id, count);
    mount(
        state,
        route,
        Some(page),
        ResponseTemplate::new(200).set_body_json(body),
    )
}

/// Mounts the daily chart.
pub(crate) fn mount_daily(state: &CarouselState, count: u64) -> StepResult {
    let body: Value = daily_payload(count, "20261012~20261018");
    mount(
        state,
        "/movie/boxoffice/daily",
        None,
        ResponseTemplate::new(200).set_body_json(body),
    )
}

/// Builds an HTTP gateway pointed at the scenario's catalog server.
pub(crate) fn gateway_for(
    state: &CarouselState,
) -> Result<HttpCatalogGateway, Box<dyn std::error::Error>> {
    let uri = state
        .server
        .with_ref(MockServer::uri)
        .ok_or("mock server URL missing")?;
    let config = HttpCatalogGatewayConfig::new(Url::parse(&uri)?)
        .with_timeout(Duration::from_secs(2));
    Ok(HttpCatalogGateway::new(config)?)
}
