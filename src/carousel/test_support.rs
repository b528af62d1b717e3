//! Fakes and payload builders for exercising the carousel in tests.

use std::sync::{Mutex, PoisonError};

use serde_json::{Value, json};

use super::controller::{CarouselObserver, ChangeCause, StateChange};
use crate::catalog::{DatasetKey, InitialPayloads};

/// Observer that keeps every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    changes: Mutex<Vec<StateChange>>,
}

impl RecordingObserver {
    /// Removes and returns the recorded changes.
    #[must_use]
    pub fn take(&self) -> Vec<StateChange> {
        self.changes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    /// Removes and returns only the causes of the recorded changes.
    #[must_use]
    pub fn take_causes(&self) -> Vec<ChangeCause> {
        self.take().into_iter().map(|change| change.cause).collect()
    }
}

impl CarouselObserver for RecordingObserver {
    fn notify(&self, change: &StateChange) {
        self.changes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(change.clone());
    }
}

/// Builds `count` raw catalog entries with ids starting at `first_id`.
#[must_use]
pub fn movie_entries(first_id: u64, count: u64) -> Vec<Value> {
    (first_id..first_id.saturating_add(count))
        .map(|id| json!({ "id": id, "title": format!("Movie {id}") }))
        .collect()
}

/// Builds a daily box-office payload.
#[must_use]
pub fn daily_payload(count: u64, range: &str) -> Value {
    json!({ "movies": movie_entries(1, count), "showRange": range })
}

/// Builds a paged (now-playing or upcoming) payload.
#[must_use]
pub fn paged_payload(first_id: u64, count: u64) -> Value {
    json!({ "content": movie_entries(first_id, count) })
}

/// Payloads with 10 daily, 20 now-playing and 8 upcoming items.
#[must_use]
pub fn sample_payloads() -> InitialPayloads {
    InitialPayloads::new()
        .with_payload(DatasetKey::Daily, daily_payload(10, "20261012~20261018"))
        .with_payload(DatasetKey::NowPlaying, paged_payload(100, 20))
        .with_payload(DatasetKey::Upcoming, paged_payload(200, 8))
}
