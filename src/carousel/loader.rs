//! Incremental "load more" paging for the pageable datasets.
//!
//! The loader owns one [`LoadState`] per pageable dataset and at most one
//! in-flight [`PageRequest`]. It decides whether a fetch may start, and it
//! classifies what came back; appending the items to the dataset is the
//! controller's job.

use serde_json::Value;

use super::dataset::decode_entries;
use crate::catalog::{CatalogError, DatasetKey, Movie};

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Default cap on items fetched per dataset per session.
pub const DEFAULT_LOAD_CEILING: usize = 150;

/// Page envelope field holding the page's items.
const PAGE_CONTENT_FIELD: &str = "content";

/// Whether a dataset can still load more pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// More pages may be requested.
    #[default]
    Available,
    /// The local ceiling was hit; terminal for the session.
    CeilingReached,
    /// The catalog returned an empty or unusable page; terminal.
    Exhausted,
    /// A fetch failed in transport; terminal, no automatic retry.
    Failed,
}

impl LoadStatus {
    /// Returns true once no further page may be requested.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Available)
    }
}

/// Paging progress of one dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadState {
    page_cursor: u32,
    total_loaded: usize,
    status: LoadStatus,
}

impl LoadState {
    /// Returns the last page number requested (0 means only the initial page).
    #[must_use]
    pub const fn page_cursor(&self) -> u32 {
        self.page_cursor
    }

    /// Returns the number of items added by "load more" so far.
    #[must_use]
    pub const fn total_loaded(&self) -> usize {
        self.total_loaded
    }

    /// Returns the loading status.
    #[must_use]
    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    /// Returns true once the ceiling has stopped further loading.
    #[must_use]
    pub const fn ceiling_reached(&self) -> bool {
        matches!(self.status, LoadStatus::CeilingReached)
    }
}

/// A page fetch the caller must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Dataset the page belongs to.
    pub dataset: DatasetKey,
    /// Page number to request (the first incremental call asks for page 1).
    pub page: u32,
    /// Items per page.
    pub size: u32,
    /// Switchboard generation the request was issued against.
    pub generation: u64,
}

/// Outcome of a "load more" step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items were fetched and should be appended.
    Appended {
        /// Items in this page.
        added: usize,
        /// Items loaded for the dataset so far, including this page.
        total_loaded: usize,
    },
    /// The ceiling was already reached; no request was made.
    CeilingReached,
    /// The catalog has nothing more to give.
    Exhausted,
    /// The fetch failed; loading stays closed for the dataset.
    TransportError {
        /// Failure detail for logs.
        message: String,
    },
    /// The page arrived after its dataset stopped being active and was dropped.
    Discarded,
    /// Nothing happened: the dataset is not pageable, loading is closed, or a
    /// fetch is already running.
    Ignored,
}

/// A classified page completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCompletion {
    /// What the completion means.
    pub outcome: LoadOutcome,
    /// Items to append; empty unless the outcome is `Appended`.
    pub items: Vec<Movie>,
}

impl PageCompletion {
    const fn without_items(outcome: LoadOutcome) -> Self {
        Self {
            outcome,
            items: Vec::new(),
        }
    }
}

/// Drives "load more" for the paged datasets.
#[derive(Debug, Clone)]
pub struct IncrementalLoader {
    now_playing: LoadState,
    upcoming: LoadState,
    page_size: u32,
    ceiling: usize,
    in_flight: Option<PageRequest>,
}

impl IncrementalLoader {
    /// Creates a loader with the given page size and per-dataset ceiling.
    #[must_use]
    pub const fn new(page_size: u32, ceiling: usize) -> Self {
        Self {
            now_playing: LoadState {
                page_cursor: 0,
                total_loaded: 0,
                status: LoadStatus::Available,
            },
            upcoming: LoadState {
                page_cursor: 0,
                total_loaded: 0,
                status: LoadStatus::Available,
            },
            page_size,
            ceiling,
            in_flight: None,
        }
    }

    /// Returns the paging state of a dataset, or `None` for `daily`.
    #[must_use]
    pub const fn state(&self, dataset: DatasetKey) -> Option<&LoadState> {
        match dataset {
            DatasetKey::Daily => None,
            DatasetKey::NowPlaying => Some(&self.now_playing),
            DatasetKey::Upcoming => Some(&self.upcoming),
        }
    }

    const fn state_mut(&mut self, dataset: DatasetKey) -> Option<&mut LoadState> {
        match dataset {
            DatasetKey::Daily => None,
            DatasetKey::NowPlaying => Some(&mut self.now_playing),
            DatasetKey::Upcoming => Some(&mut self.upcoming),
        }
    }

    /// Forgets a dataset's paging progress, as when fresh data replaces it.
    pub fn reset(&mut self, dataset: DatasetKey) {
        if let Some(state) = self.state_mut(dataset) {
            *state = LoadState::default();
        }
    }

    /// Returns the request currently in flight.
    #[must_use]
    pub const fn in_flight(&self) -> Option<&PageRequest> {
        self.in_flight.as_ref()
    }

    /// Returns true while a fetch is outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns the configured ceiling.
    #[must_use]
    pub const fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Returns the configured page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Starts a "load more" step for `dataset`.
    ///
    /// The ceiling is checked before anything else and only against what was
    /// loaded before this call, so the page that crosses the ceiling is still
    /// fetched; the call after it is refused.
    ///
    /// # Errors
    ///
    /// Returns the terminal [`LoadOutcome`] when no request should be made:
    /// `CeilingReached` when the cap was hit, `Ignored` when the dataset is
    /// not pageable, already closed, or a fetch is running.
    pub fn begin(
        &mut self,
        dataset: DatasetKey,
        generation: u64,
    ) -> Result<PageRequest, LoadOutcome> {
        if self.in_flight.is_some() {
            return Err(LoadOutcome::Ignored);
        }
        let ceiling = self.ceiling;
        let page_size = self.page_size;
        let Some(state) = self.state_mut(dataset) else {
            return Err(LoadOutcome::Ignored);
        };
        if state.status.is_terminal() {
            return Err(LoadOutcome::Ignored);
        }
        if state.total_loaded >= ceiling {
            state.status = LoadStatus::CeilingReached;
            return Err(LoadOutcome::CeilingReached);
        }

        state.page_cursor = state.page_cursor.saturating_add(1);
        let request = PageRequest {
            dataset,
            page: state.page_cursor,
            size: page_size,
            generation,
        };
        self.in_flight = Some(request);
        Ok(request)
    }

    /// Classifies the response to the in-flight request.
    ///
    /// A completion for any other request is ignored and leaves the in-flight
    /// request untouched.
    pub fn complete(
        &mut self,
        request: &PageRequest,
        response: Result<Value, CatalogError>,
    ) -> PageCompletion {
        if self.in_flight.as_ref() != Some(request) {
            return PageCompletion::without_items(LoadOutcome::Ignored);
        }
        self.in_flight = None;

        let Some(state) = self.state_mut(request.dataset) else {
            return PageCompletion::without_items(LoadOutcome::Ignored);
        };

        let body = match response {
            Ok(body) => body,
            Err(error) => {
                state.status = LoadStatus::Failed;
                tracing::warn!(
                    "load more for {} page {} failed: {error}",
                    request.dataset,
                    request.page
                );
                return PageCompletion::without_items(LoadOutcome::TransportError {
                    message: error.to_string(),
                });
            }
        };

        let items = page_items(request.dataset, &body);
        if items.is_empty() {
            state.status = LoadStatus::Exhausted;
            return PageCompletion::without_items(LoadOutcome::Exhausted);
        }

        state.total_loaded = state.total_loaded.saturating_add(items.len());
        PageCompletion {
            outcome: LoadOutcome::Appended {
                added: items.len(),
                total_loaded: state.total_loaded,
            },
            items,
        }
    }

    /// Drops the in-flight request without applying it.
    ///
    /// The dataset's page cursor is rolled back so the same page is requested
    /// again next time.
    pub fn discard(&mut self, request: &PageRequest) -> LoadOutcome {
        if self.in_flight.as_ref() != Some(request) {
            return LoadOutcome::Ignored;
        }
        self.in_flight = None;
        if let Some(state) = self.state_mut(request.dataset) {
            if state.page_cursor == request.page {
                state.page_cursor = state.page_cursor.saturating_sub(1);
            }
        }
        LoadOutcome::Discarded
    }
}

impl Default for IncrementalLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_LOAD_CEILING)
    }
}

/// Extracts a page's movies from a bare array or a page envelope.
///
/// Anything else, and entries that are not movies, count as no items.
fn page_items(dataset: DatasetKey, body: &Value) -> Vec<Movie> {
    let entries = match body {
        Value::Array(entries) => entries,
        Value::Object(fields) => {
            let Some(Value::Array(entries)) = fields.get(PAGE_CONTENT_FIELD) else {
                return Vec::new();
            };
            entries
        }
        _ => return Vec::new(),
    };

    let normalized = decode_entries(dataset, entries);
    for diagnostic in &normalized.diagnostics {
        tracing::warn!("{diagnostic}");
    }
    normalized.items
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    use super::{IncrementalLoader, LoadOutcome, LoadStatus, PageRequest};
    use crate::catalog::{CatalogError, DatasetKey};

    fn page(count: u64) -> Value {
        Value::Array(
            (1..=count)
                .map(|id| json!({ "id": id, "title": format!("Paged {id}") }))
                .collect(),
        )
    }

    #[fixture]
    fn loader() -> IncrementalLoader {
        IncrementalLoader::new(20, 150)
    }

    fn load_page(loader: &mut IncrementalLoader, body: Value) -> LoadOutcome {
        let request = loader
            .begin(DatasetKey::NowPlaying, 1)
            .expect("request should start");
        loader.complete(&request, Ok(body)).outcome
    }

    #[rstest]
    fn first_call_requests_page_one(mut loader: IncrementalLoader) {
        let request = loader
            .begin(DatasetKey::Upcoming, 7)
            .expect("request should start");

        assert_eq!(
            request,
            PageRequest {
                dataset: DatasetKey::Upcoming,
                page: 1,
                size: 20,
                generation: 7,
            }
        );
        assert!(loader.is_busy());
    }

    #[rstest]
    fn daily_is_not_pageable(mut loader: IncrementalLoader) {
        assert_eq!(
            loader.begin(DatasetKey::Daily, 1),
            Err(LoadOutcome::Ignored)
        );
        assert!(loader.state(DatasetKey::Daily).is_none());
    }

    #[rstest]
    fn second_begin_while_busy_is_ignored(mut loader: IncrementalLoader) {
        let _first = loader.begin(DatasetKey::NowPlaying, 1);

        assert_eq!(
            loader.begin(DatasetKey::Upcoming, 1),
            Err(LoadOutcome::Ignored)
        );
    }

    #[rstest]
    fn ceiling_check_happens_before_the_call(mut loader: IncrementalLoader) {
        for _ in 0..7 {
            load_page(&mut loader, page(20));
        }
        let state = loader.state(DatasetKey::NowPlaying).expect("pageable");
        assert_eq!(state.total_loaded(), 140);

        assert_eq!(
            load_page(&mut loader, page(20)),
            LoadOutcome::Appended {
                added: 20,
                total_loaded: 160,
            }
        );
        assert_eq!(
            loader.begin(DatasetKey::NowPlaying, 1),
            Err(LoadOutcome::CeilingReached)
        );

        let state = loader.state(DatasetKey::NowPlaying).expect("pageable");
        assert!(state.ceiling_reached());
        assert_eq!(state.page_cursor(), 8);
        assert_eq!(
            loader.begin(DatasetKey::NowPlaying, 1),
            Err(LoadOutcome::Ignored)
        );
    }

    #[rstest]
    #[case::empty_array(json!([]))]
    #[case::null(Value::Null)]
    #[case::string(json!("no more"))]
    #[case::object_without_content(json!({ "last": true }))]
    #[case::only_malformed_entries(json!([{ "name": "not a movie" }]))]
    fn empty_or_malformed_page_exhausts(mut loader: IncrementalLoader, #[case] body: Value) {
        assert_eq!(load_page(&mut loader, body), LoadOutcome::Exhausted);

        let state = loader.state(DatasetKey::NowPlaying).expect("pageable");
        assert_eq!(state.status(), LoadStatus::Exhausted);
        assert!(!loader.is_busy());
    }

    #[rstest]
    fn page_envelope_content_is_accepted(mut loader: IncrementalLoader) {
        let body = json!({ "content": page(3), "last": false });

        assert_eq!(
            load_page(&mut loader, body),
            LoadOutcome::Appended {
                added: 3,
                total_loaded: 3,
            }
        );
    }

    #[rstest]
    fn transport_error_closes_loading(mut loader: IncrementalLoader) {
        let request = loader
            .begin(DatasetKey::Upcoming, 1)
            .expect("request should start");
        let completion = loader.complete(
            &request,
            Err(CatalogError::Network {
                message: "timed out".to_owned(),
            }),
        );

        assert!(matches!(
            completion.outcome,
            LoadOutcome::TransportError { .. }
        ));
        let state = loader.state(DatasetKey::Upcoming).expect("pageable");
        assert_eq!(state.status(), LoadStatus::Failed);
        assert_eq!(
            loader.begin(DatasetKey::Upcoming, 1),
            Err(LoadOutcome::Ignored)
        );
        assert!(
            loader.begin(DatasetKey::NowPlaying, 1).is_ok(),
            "other dataset keeps loading"
        );
    }

    #[rstest]
    fn unknown_completion_is_ignored(mut loader: IncrementalLoader) {
        let request = loader
            .begin(DatasetKey::NowPlaying, 1)
            .expect("request should start");
        let forged = PageRequest { page: 9, ..request };

        let completion = loader.complete(&forged, Ok(page(2)));

        assert_eq!(completion.outcome, LoadOutcome::Ignored);
        assert!(loader.is_busy());
    }

    #[rstest]
    fn discard_rolls_back_page_cursor(mut loader: IncrementalLoader) {
        let request = loader
            .begin(DatasetKey::NowPlaying, 1)
            .expect("request should start");

        assert_eq!(loader.discard(&request), LoadOutcome::Discarded);

        let retry = loader
            .begin(DatasetKey::NowPlaying, 2)
            .expect("request should start again");
        assert_eq!(retry.page, 1);
    }

    #[rstest]
    fn reset_reopens_a_closed_dataset(mut loader: IncrementalLoader) {
        load_page(&mut loader, json!([]));
        loader.reset(DatasetKey::NowPlaying);

        assert!(loader.begin(DatasetKey::NowPlaying, 1).is_ok());
    }
}
