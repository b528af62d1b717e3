//! Status line fed by carousel state-change notifications.

use std::sync::{Mutex, PoisonError};

use crate::carousel::{CarouselObserver, ChangeCause, LoadOutcome, StateChange};

/// Keeps a one-line description of the latest notable carousel event.
#[derive(Debug, Default)]
pub(crate) struct StatusLine {
    message: Mutex<Option<String>>,
}

impl StatusLine {
    /// Returns the current message.
    pub(crate) fn current(&self) -> Option<String> {
        self.message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CarouselObserver for StatusLine {
    fn notify(&self, change: &StateChange) {
        *self.message.lock().unwrap_or_else(PoisonError::into_inner) = describe(&change.cause);
    }
}

fn describe(cause: &ChangeCause) -> Option<String> {
    match cause {
        ChangeCause::DatasetSwitched(report) if !report.diagnostics.is_empty() => Some(format!(
            "{} problem(s) reading {}; showing what could be read",
            report.diagnostics.len(),
            report.dataset
        )),
        ChangeCause::LoadStarted(request) => Some(format!(
            "Loading page {} of {}...",
            request.page, request.dataset
        )),
        ChangeCause::LoadFinished(outcome) => describe_outcome(outcome),
        ChangeCause::DatasetSwitched(_)
        | ChangeCause::WindowMoved(_)
        | ChangeCause::ModeChanged(_) => None,
    }
}

fn describe_outcome(outcome: &LoadOutcome) -> Option<String> {
    match outcome {
        LoadOutcome::Appended {
            added,
            total_loaded,
        } => Some(format!("Loaded {added} more ({total_loaded} so far)")),
        LoadOutcome::CeilingReached => Some("Reached the load limit".to_owned()),
        LoadOutcome::Exhausted => Some("No more data".to_owned()),
        LoadOutcome::TransportError { message } => Some(format!("Could not load more: {message}")),
        LoadOutcome::Discarded => Some("Dropped a page for a dataset no longer shown".to_owned()),
        LoadOutcome::Ignored => None,
    }
}
