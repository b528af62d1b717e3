//! Named datasets and the switchboard that keeps one of them active.
//!
//! Each source delivers its items under its own field (see
//! [`DatasetKey::items_field`]). Normalisation folds those shapes into a
//! uniform `Vec<Movie>` and reports shape problems as diagnostics rather than
//! errors: a broken payload becomes an empty dataset and the page keeps
//! working.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use serde_json::Value;
use thiserror::Error;

use super::windows::{WindowSet, compute_windows};
use crate::catalog::{DatasetKey, Movie};

/// Payload field carrying the daily ranking's display range.
const RANGE_FIELD: &str = "showRange";
/// Older box-office payloads call the range field `range`.
const LEGACY_RANGE_FIELD: &str = "range";

/// Shape problems found while normalising a dataset payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    /// No payload was delivered for the dataset.
    #[error("{dataset} payload is missing")]
    MissingPayload {
        /// Dataset the payload was expected for.
        dataset: DatasetKey,
    },

    /// The payload has no list under the dataset's items field.
    #[error("{dataset} payload has no `{field}` list")]
    MissingItems {
        /// Dataset being normalised.
        dataset: DatasetKey,
        /// Field that should have held the items.
        field: &'static str,
    },

    /// A single entry could not be read as a movie and was skipped.
    #[error("{dataset} entry {position} skipped: {message}")]
    MalformedItem {
        /// Dataset being normalised.
        dataset: DatasetKey,
        /// Zero-based position of the entry in the payload list.
        position: usize,
        /// Decoder error detail.
        message: String,
    },
}

/// Result of normalising a payload: the usable items plus any diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Items in payload order.
    pub items: Vec<Movie>,
    /// Problems found along the way; empty for a clean payload.
    pub diagnostics: Vec<NormalizationError>,
}

/// Normalises a raw dataset payload into an ordered item list.
#[must_use]
pub fn normalize_payload(dataset: DatasetKey, payload: Option<&Value>) -> Normalized {
    let Some(payload) = payload else {
        return Normalized {
            items: Vec::new(),
            diagnostics: vec![NormalizationError::MissingPayload { dataset }],
        };
    };

    let field = dataset.items_field();
    let Some(entries) = payload.get(field).and_then(Value::as_array) else {
        return Normalized {
            items: Vec::new(),
            diagnostics: vec![NormalizationError::MissingItems { dataset, field }],
        };
    };

    decode_entries(dataset, entries)
}

/// Decodes a list of raw entries, skipping the ones that are not movies.
pub(crate) fn decode_entries(dataset: DatasetKey, entries: &[Value]) -> Normalized {
    let mut normalized = Normalized::default();
    for (position, entry) in entries.iter().enumerate() {
        match serde_json::from_value::<Movie>(entry.clone()) {
            Ok(movie) => normalized.items.push(movie),
            Err(error) => normalized
                .diagnostics
                .push(NormalizationError::MalformedItem {
                    dataset,
                    position,
                    message: error.to_string(),
                }),
        }
    }
    normalized
}

/// Returns today's local date as a compact `YYYYMMDD` token.
///
/// The paged datasets have no server-provided range, so this token stands in
/// for it.
#[must_use]
pub fn today_token() -> String {
    chrono::Local::now().format("%Y%m%d").to_string()
}

fn range_info_for(dataset: DatasetKey, payload: Option<&Value>, today: &str) -> String {
    if dataset.is_pageable() {
        return today.to_owned();
    }

    payload
        .and_then(|value| {
            value
                .get(RANGE_FIELD)
                .or_else(|| value.get(LEGACY_RANGE_FIELD))
        })
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// A named collection of items with its display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    items: Vec<Movie>,
    label: String,
    range_info: String,
}

impl Dataset {
    /// Returns the items in display order.
    #[must_use]
    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    /// Returns the dataset heading.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the display string for the active range.
    #[must_use]
    pub fn range_info(&self) -> &str {
        &self.range_info
    }

    /// Returns the number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when the dataset has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What a dataset switch produced, for collaborators that mirror it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchReport {
    /// Dataset that is now active.
    pub dataset: DatasetKey,
    /// Heading for the dataset.
    pub label: String,
    /// Display string for the active range.
    pub range_info: String,
    /// Number of items now shown.
    pub item_count: usize,
    /// Number of windows the items were split into.
    pub window_count: usize,
    /// Normalisation problems; empty for a clean payload or a re-activation.
    pub diagnostics: Vec<NormalizationError>,
}

/// Holds the installed datasets and which one is active.
///
/// The window set always describes the active dataset. Every switch bumps a
/// generation counter so that work started against an earlier activation can
/// be recognised as stale.
#[derive(Debug, Clone)]
pub struct DatasetSwitchboard {
    datasets: BTreeMap<DatasetKey, Dataset>,
    active: DatasetKey,
    windows: WindowSet,
    window_size: NonZeroUsize,
    generation: u64,
}

impl DatasetSwitchboard {
    /// Creates a switchboard with no installed datasets and `daily` active.
    #[must_use]
    pub fn new(window_size: NonZeroUsize) -> Self {
        Self {
            datasets: BTreeMap::new(),
            active: DatasetKey::Daily,
            windows: compute_windows(0, window_size),
            window_size,
            generation: 0,
        }
    }

    /// Normalises `payload`, installs it as `dataset` and makes it active.
    ///
    /// Any previously installed items for the dataset are replaced. Shape
    /// problems are logged and returned in the report; they never abort the
    /// switch.
    pub fn switch_to(
        &mut self,
        dataset: DatasetKey,
        payload: Option<&Value>,
        label: &str,
        today: &str,
    ) -> SwitchReport {
        let Normalized { items, diagnostics } = normalize_payload(dataset, payload);
        for diagnostic in &diagnostics {
            tracing::warn!("{diagnostic}");
        }

        self.datasets.insert(
            dataset,
            Dataset {
                items,
                label: label.to_owned(),
                range_info: range_info_for(dataset, payload, today),
            },
        );
        self.make_active(dataset, diagnostics)
    }

    /// Makes an already installed dataset active without re-normalising it.
    ///
    /// Items appended by "load more" survive re-activation. Returns `None`
    /// when the dataset has not been installed yet.
    pub fn activate(&mut self, dataset: DatasetKey) -> Option<SwitchReport> {
        if !self.datasets.contains_key(&dataset) {
            return None;
        }
        Some(self.make_active(dataset, Vec::new()))
    }

    fn make_active(
        &mut self,
        dataset: DatasetKey,
        diagnostics: Vec<NormalizationError>,
    ) -> SwitchReport {
        self.active = dataset;
        self.generation = self.generation.wrapping_add(1);
        self.rewindow();

        let (label, range_info) = self
            .datasets
            .get(&dataset)
            .map(|set| (set.label.clone(), set.range_info.clone()))
            .unwrap_or_default();

        SwitchReport {
            dataset,
            label,
            range_info,
            item_count: self.item_count(),
            window_count: self.windows.len(),
            diagnostics,
        }
    }

    fn rewindow(&mut self) {
        self.windows = compute_windows(self.item_count(), self.window_size);
    }

    /// Appends items to the active dataset and recomputes its windows.
    ///
    /// Returns the number of items appended.
    pub(crate) fn append_to_active(&mut self, items: Vec<Movie>) -> usize {
        let added = items.len();
        if let Some(dataset) = self.datasets.get_mut(&self.active) {
            dataset.items.extend(items);
        }
        self.rewindow();
        added
    }

    /// Returns true when the dataset has been installed.
    #[must_use]
    pub fn is_installed(&self, dataset: DatasetKey) -> bool {
        self.datasets.contains_key(&dataset)
    }

    /// Returns the active dataset key.
    #[must_use]
    pub const fn active_key(&self) -> DatasetKey {
        self.active
    }

    /// Returns the active dataset, if installed.
    #[must_use]
    pub fn active_dataset(&self) -> Option<&Dataset> {
        self.datasets.get(&self.active)
    }

    /// Returns an installed dataset.
    #[must_use]
    pub fn dataset(&self, dataset: DatasetKey) -> Option<&Dataset> {
        self.datasets.get(&dataset)
    }

    /// Returns the active dataset's items (empty when nothing is installed).
    #[must_use]
    pub fn items(&self) -> &[Movie] {
        self.active_dataset().map(Dataset::items).unwrap_or(&[])
    }

    /// Returns the number of items in the active dataset.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.active_dataset().map_or(0, Dataset::len)
    }

    /// Returns the windows of the active dataset.
    #[must_use]
    pub const fn windows(&self) -> &WindowSet {
        &self.windows
    }

    /// Returns the configured window size.
    #[must_use]
    pub const fn window_size(&self) -> NonZeroUsize {
        self.window_size
    }

    /// Returns true when the active dataset has more items than one window.
    #[must_use]
    pub fn overflows_window(&self) -> bool {
        self.item_count() > self.window_size.get()
    }

    /// Returns the activation counter.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
