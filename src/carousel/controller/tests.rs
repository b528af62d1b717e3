//! Behavioural tests for the carousel controller.

use std::sync::Arc;
use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::carousel::controls::LoadMoreLabel;
use crate::carousel::loader::LoadStatus;
use crate::carousel::test_support::{
    RecordingObserver, movie_entries, paged_payload, sample_payloads,
};
use crate::carousel::view_mode::{Layout, ModeChange};
use crate::catalog::{CatalogGateway, HttpCatalogGateway, HttpCatalogGatewayConfig};

const TODAY: &str = "20261019";

#[fixture]
fn controller() -> CarouselController {
    CarouselController::with_today(CarouselSettings::default(), sample_payloads(), TODAY)
}

fn start_load(controller: &mut CarouselController) -> PageRequest {
    controller.dispatch(CarouselEvent::ShowList);
    controller
        .dispatch(CarouselEvent::LoadMore)
        .expect("load more should issue a request")
}

fn respond(controller: &mut CarouselController, request: PageRequest, body: Value) {
    let effect = controller.dispatch(CarouselEvent::PageLoaded {
        request,
        response: Ok(body),
    });
    assert!(effect.is_none(), "completions never start another fetch");
}

fn visible_ids(controller: &CarouselController) -> Vec<u64> {
    controller
        .visible_items()
        .iter()
        .filter_map(|movie| movie.id)
        .collect()
}

#[rstest]
fn starts_on_daily_with_server_range(controller: CarouselController) {
    let dataset = controller.active_dataset().expect("daily is installed");

    assert_eq!(controller.view_state().active_dataset, DatasetKey::Daily);
    assert_eq!(dataset.range_info(), "20261012~20261018");
    assert_eq!(dataset.label(), "Daily box office");
    assert_eq!(controller.window_count(), 3);
    assert_eq!(visible_ids(&controller), vec![1, 2, 3, 4]);
}

#[rstest]
fn now_playing_with_twenty_items_has_five_windows(mut controller: CarouselController) {
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));

    assert_eq!(controller.window_count(), 5);
    assert!(controller.affordances().navigation_visible);
    assert_eq!(
        controller.active_dataset().map(Dataset::range_info),
        Some(TODAY)
    );
}

#[rstest]
fn reselecting_active_dataset_resets_window(mut controller: CarouselController) {
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));
    for _ in 0..3 {
        controller.dispatch(CarouselEvent::Next);
    }
    assert_eq!(controller.current_window(), 3);

    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));

    assert_eq!(controller.current_window(), 0);
    assert_eq!(controller.switchboard().item_count(), 20);
}

#[rstest]
fn navigation_wraps_in_both_directions(mut controller: CarouselController) {
    controller.dispatch(CarouselEvent::Previous);
    assert_eq!(controller.current_window(), 2);
    assert_eq!(visible_ids(&controller), vec![9, 10]);
    assert_eq!(controller.window_offset(), 8);

    controller.dispatch(CarouselEvent::Next);
    assert_eq!(controller.current_window(), 0);
}

#[rstest]
fn navigation_is_inert_when_items_fit_one_window() {
    let payloads = sample_payloads().with_payload(
        DatasetKey::Daily,
        json!({ "movies": movie_entries(1, 4), "showRange": "" }),
    );
    let mut controller =
        CarouselController::with_today(CarouselSettings::default(), payloads, TODAY);

    controller.dispatch(CarouselEvent::Next);

    assert!(!controller.affordances().navigation_visible);
    assert_eq!(controller.current_window(), 0);
}

#[rstest]
fn list_mode_round_trip_returns_to_same_window(mut controller: CarouselController) {
    let observer = Arc::new(RecordingObserver::default());
    controller.subscribe(observer.clone());
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));
    controller.dispatch(CarouselEvent::Next);
    controller.dispatch(CarouselEvent::Next);

    controller.dispatch(CarouselEvent::ShowList);
    let affordances = controller.affordances();
    assert!(!affordances.navigation_visible);
    assert_eq!(affordances.layout, Layout::Wrapped);
    assert_eq!(controller.visible_items().len(), 20);

    controller.dispatch(CarouselEvent::Next);
    assert_eq!(controller.current_window(), 2, "navigation is hidden in list mode");

    controller.dispatch(CarouselEvent::ShowSlides);
    assert_eq!(controller.current_window(), 2);
    assert_eq!(visible_ids(&controller), vec![108, 109, 110, 111]);

    let causes = observer.take_causes();
    assert_eq!(
        causes.last(),
        Some(&ChangeCause::ModeChanged(ModeChange {
            mode: ViewMode::Slide,
            layout: Layout::Track,
            transition: Some(WindowTransition::Jump),
        }))
    );
    assert!(causes.contains(&ChangeCause::WindowMoved(WindowTransition::Move)));
}

#[rstest]
fn load_more_is_hidden_for_daily_and_in_slide_mode(mut controller: CarouselController) {
    assert!(controller.dispatch(CarouselEvent::LoadMore).is_none());

    controller.dispatch(CarouselEvent::ShowList);
    assert!(!controller.affordances().load_more.visible);
    assert!(controller.dispatch(CarouselEvent::LoadMore).is_none());

    controller.dispatch(CarouselEvent::ShowSlides);
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::Upcoming));
    assert!(!controller.affordances().load_more.visible);
    assert!(controller.dispatch(CarouselEvent::LoadMore).is_none());
}

#[rstest]
fn successful_page_appends_and_rewindows(mut controller: CarouselController) {
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));
    let request = start_load(&mut controller);

    assert_eq!(request.dataset, DatasetKey::NowPlaying);
    assert_eq!(request.page, 1);
    assert_eq!(request.size, 20);

    respond(&mut controller, request, Value::Array(movie_entries(500, 20)));

    assert_eq!(controller.items().len(), 40);
    assert_eq!(controller.window_count(), 10);
    assert_eq!(controller.current_window(), 0);
    assert_eq!(controller.items().last().and_then(|movie| movie.id), Some(519));
    let state = controller
        .load_state(DatasetKey::NowPlaying)
        .expect("pageable");
    assert_eq!(state.total_loaded(), 20);
    assert_eq!(state.page_cursor(), 1);
    assert!(controller.affordances().load_more.enabled);
}

#[rstest]
fn fetch_in_flight_locks_every_control(mut controller: CarouselController) {
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::Upcoming));
    let request = start_load(&mut controller);

    let affordances = controller.affordances();
    assert!(!affordances.controls_enabled);
    assert!(!affordances.load_more.enabled);

    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::Daily));
    controller.dispatch(CarouselEvent::ShowSlides);
    assert!(controller.dispatch(CarouselEvent::LoadMore).is_none());
    assert_eq!(controller.view_state().active_dataset, DatasetKey::Upcoming);
    assert_eq!(controller.view_state().view_mode, ViewMode::List);

    respond(&mut controller, request, json!({ "content": movie_entries(900, 3) }));

    assert!(controller.affordances().controls_enabled);
    assert_eq!(controller.items().len(), 11);
}

#[rstest]
fn empty_page_exhausts_loading(mut controller: CarouselController) {
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));
    let request = start_load(&mut controller);

    respond(&mut controller, request, json!([]));

    let affordances = controller.affordances();
    assert!(affordances.controls_enabled);
    assert!(affordances.load_more.visible);
    assert!(!affordances.load_more.enabled);
    assert_eq!(affordances.load_more.label, LoadMoreLabel::NoMoreData);
    assert!(controller.dispatch(CarouselEvent::LoadMore).is_none());
    assert_eq!(controller.items().len(), 20);
}

#[rstest]
fn transport_failure_hides_load_more(mut controller: CarouselController) {
    let observer = Arc::new(RecordingObserver::default());
    controller.subscribe(observer.clone());
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));
    let request = start_load(&mut controller);

    controller.dispatch(CarouselEvent::PageLoaded {
        request,
        response: Err(CatalogError::Network {
            message: "connection reset".to_owned(),
        }),
    });

    let affordances = controller.affordances();
    assert!(affordances.controls_enabled);
    assert!(!affordances.load_more.visible);
    assert_eq!(
        controller
            .load_state(DatasetKey::NowPlaying)
            .map(LoadState::status),
        Some(LoadStatus::Failed)
    );
    assert!(matches!(
        observer.take_causes().last(),
        Some(ChangeCause::LoadFinished(LoadOutcome::TransportError { .. }))
    ));
}

#[rstest]
#[tokio::test]
async fn page_timeout_fails_closed_and_releases_controls(mut controller: CarouselController) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/now-playing"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(paged_payload(500, 20))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;
    let base_url = Url::parse(&server.uri()).expect("valid base URL");
    let gateway = HttpCatalogGateway::new(
        HttpCatalogGatewayConfig::new(base_url).with_timeout(Duration::from_millis(50)),
    )
    .expect("gateway should build");

    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));
    let request = start_load(&mut controller);
    assert!(!controller.affordances().controls_enabled);

    let response = gateway
        .movie_page(request.dataset, request.page, request.size)
        .await;
    assert!(matches!(response, Err(CatalogError::Network { .. })));
    controller.dispatch(CarouselEvent::PageLoaded { request, response });

    let affordances = controller.affordances();
    assert!(affordances.controls_enabled);
    assert!(!affordances.load_more.visible);
    assert_eq!(controller.items().len(), 20);
    assert_eq!(
        controller
            .load_state(DatasetKey::NowPlaying)
            .map(LoadState::status),
        Some(LoadStatus::Failed)
    );
    assert_eq!(controller.dispatch(CarouselEvent::LoadMore), None);
}

#[rstest]
fn ceiling_allows_overshoot_then_stops() {
    let settings = CarouselSettings {
        load_ceiling: 30,
        ..CarouselSettings::default()
    };
    let mut controller = CarouselController::with_today(settings, sample_payloads(), TODAY);
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));

    let first = start_load(&mut controller);
    respond(&mut controller, first, Value::Array(movie_entries(500, 20)));
    let second = controller
        .dispatch(CarouselEvent::LoadMore)
        .expect("20 < 30 so the fetch proceeds");
    assert_eq!(second.page, 2);
    respond(&mut controller, second, Value::Array(movie_entries(600, 20)));

    assert!(controller.dispatch(CarouselEvent::LoadMore).is_none());

    let state = controller
        .load_state(DatasetKey::NowPlaying)
        .expect("pageable");
    assert_eq!(state.total_loaded(), 40);
    assert!(state.ceiling_reached());
    assert_eq!(
        controller.affordances().load_more.label,
        LoadMoreLabel::LastPage
    );
}

#[rstest]
fn stale_page_is_discarded_after_switch(mut controller: CarouselController) {
    let observer = Arc::new(RecordingObserver::default());
    controller.subscribe(observer.clone());
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));
    let request = start_load(&mut controller);

    controller.switch_to(
        DatasetKey::Upcoming,
        Some(&paged_payload(300, 5)),
        "Coming soon",
    );
    respond(&mut controller, request, Value::Array(movie_entries(700, 20)));

    assert_eq!(controller.items().len(), 5);
    assert_eq!(
        controller
            .switchboard()
            .dataset(DatasetKey::NowPlaying)
            .map(Dataset::len),
        Some(20)
    );
    let state = controller
        .load_state(DatasetKey::NowPlaying)
        .expect("pageable");
    assert_eq!(state.page_cursor(), 0);
    assert_eq!(state.total_loaded(), 0);
    assert!(!controller.is_busy());
    assert_eq!(
        observer.take_causes().last(),
        Some(&ChangeCause::LoadFinished(LoadOutcome::Discarded))
    );
}

#[rstest]
fn stale_page_for_reactivated_dataset_is_discarded(mut controller: CarouselController) {
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));
    let request = start_load(&mut controller);

    controller.switch_to(
        DatasetKey::NowPlaying,
        Some(&paged_payload(100, 20)),
        "Now playing",
    );
    respond(&mut controller, request, Value::Array(movie_entries(700, 20)));

    assert_eq!(controller.items().len(), 20);
}

#[rstest]
fn completion_without_matching_request_is_ignored(mut controller: CarouselController) {
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));
    let forged = PageRequest {
        dataset: DatasetKey::NowPlaying,
        page: 1,
        size: 20,
        generation: controller.switchboard().generation(),
    };

    respond(&mut controller, forged, Value::Array(movie_entries(700, 20)));

    assert_eq!(controller.items().len(), 20);
}

#[rstest]
fn appended_items_survive_reactivation(mut controller: CarouselController) {
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));
    let request = start_load(&mut controller);
    respond(&mut controller, request, Value::Array(movie_entries(500, 4)));

    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::Daily));
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));

    assert_eq!(controller.items().len(), 24);
    let next = controller
        .dispatch(CarouselEvent::LoadMore)
        .expect("loading continues where it left off");
    assert_eq!(next.page, 2);
}

#[rstest]
fn absent_controls_ignore_events() {
    let settings = CarouselSettings {
        controls: ControlSet::NONE,
        ..CarouselSettings::default()
    };
    let mut controller = CarouselController::with_today(settings, sample_payloads(), TODAY);

    controller.dispatch(CarouselEvent::Next);
    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::NowPlaying));
    controller.dispatch(CarouselEvent::ShowList);

    let view = controller.view_state();
    assert_eq!(view.active_dataset, DatasetKey::Daily);
    assert_eq!(view.current_window, 0);
    assert_eq!(view.view_mode, ViewMode::Slide);
    let affordances = controller.affordances();
    assert!(!affordances.navigation_visible);
    assert_eq!(affordances.active_tab, None);
    assert!(!affordances.load_more.visible);
}

#[rstest]
fn missing_payloads_degrade_to_empty_window() {
    let mut controller = CarouselController::with_today(
        CarouselSettings::default(),
        InitialPayloads::new(),
        TODAY,
    );

    assert_eq!(controller.window_count(), 1);
    assert!(controller.visible_items().is_empty());

    let report = controller.switch_to(DatasetKey::Upcoming, None, "Coming soon");
    assert_eq!(report.item_count, 0);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(controller.visible_items().is_empty());
}

#[rstest]
fn observers_see_switches_with_affordances(mut controller: CarouselController) {
    let observer = Arc::new(RecordingObserver::default());
    controller.subscribe(observer.clone());

    controller.dispatch(CarouselEvent::SelectDataset(DatasetKey::Upcoming));

    let changes = observer.take();
    let [change] = changes.as_slice() else {
        panic!("expected one change, got {changes:?}");
    };
    let ChangeCause::DatasetSwitched(report) = &change.cause else {
        panic!("expected a dataset switch, got {:?}", change.cause);
    };
    assert_eq!(report.dataset, DatasetKey::Upcoming);
    assert_eq!(report.item_count, 8);
    assert_eq!(report.window_count, 2);
    assert_eq!(change.view.current_window, 0);
    assert_eq!(change.affordances.active_tab, Some(DatasetKey::Upcoming));
    assert!(change.affordances.navigation_visible);
}
