//! Start-up intake of the three dataset payloads.

use serde_json::Value;

use super::gateway::CatalogGateway;
use super::models::DatasetKey;

/// Raw payloads each dataset starts with.
///
/// A missing payload is kept as `None`; the carousel degrades it to an empty
/// dataset instead of refusing to start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialPayloads {
    daily: Option<Value>,
    now_playing: Option<Value>,
    upcoming: Option<Value>,
}

impl InitialPayloads {
    /// Creates an empty set of payloads.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the payload for a dataset, replacing any previous one.
    #[must_use]
    pub fn with_payload(mut self, dataset: DatasetKey, payload: Value) -> Self {
        *self.slot_mut(dataset) = Some(payload);
        self
    }

    /// Returns the payload for a dataset, if one was loaded.
    #[must_use]
    pub const fn get(&self, dataset: DatasetKey) -> Option<&Value> {
        match dataset {
            DatasetKey::Daily => self.daily.as_ref(),
            DatasetKey::NowPlaying => self.now_playing.as_ref(),
            DatasetKey::Upcoming => self.upcoming.as_ref(),
        }
    }

    const fn slot_mut(&mut self, dataset: DatasetKey) -> &mut Option<Value> {
        match dataset {
            DatasetKey::Daily => &mut self.daily,
            DatasetKey::NowPlaying => &mut self.now_playing,
            DatasetKey::Upcoming => &mut self.upcoming,
        }
    }

    /// Loads every dataset's payload through the gateway.
    ///
    /// Failures are logged and leave that dataset's payload empty; one
    /// unavailable source never blocks the other two.
    pub async fn fetch<Gateway>(gateway: &Gateway) -> Self
    where
        Gateway: CatalogGateway + ?Sized,
    {
        let mut payloads = Self::new();
        for dataset in DatasetKey::ALL {
            match gateway.initial_payload(dataset).await {
                Ok(payload) => *payloads.slot_mut(dataset) = Some(payload),
                Err(error) => {
                    tracing::warn!("initial {dataset} payload unavailable: {error}");
                }
            }
        }
        payloads
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::json;

    use super::InitialPayloads;
    use crate::catalog::gateway::MockCatalogGateway;
    use crate::catalog::{CatalogError, DatasetKey};

    #[rstest]
    #[tokio::test]
    async fn fetch_keeps_available_payloads_when_one_source_fails() {
        let mut gateway = MockCatalogGateway::new();
        gateway
            .expect_initial_payload()
            .with(eq(DatasetKey::Daily))
            .times(1)
            .returning(|_| Ok(json!({ "movies": [], "showRange": "20251110~20251110" })));
        gateway
            .expect_initial_payload()
            .with(eq(DatasetKey::NowPlaying))
            .times(1)
            .returning(|_| {
                Err(CatalogError::Network {
                    message: "connection refused".to_owned(),
                })
            });
        gateway
            .expect_initial_payload()
            .with(eq(DatasetKey::Upcoming))
            .times(1)
            .returning(|_| Ok(json!({ "content": [] })));

        let payloads = InitialPayloads::fetch(&gateway).await;

        assert!(payloads.get(DatasetKey::Daily).is_some());
        assert!(payloads.get(DatasetKey::NowPlaying).is_none());
        assert_eq!(
            payloads.get(DatasetKey::Upcoming),
            Some(&json!({ "content": [] }))
        );
    }

    #[rstest]
    fn with_payload_replaces_existing_value() {
        let payloads = InitialPayloads::new()
            .with_payload(DatasetKey::Daily, json!({ "movies": [1] }))
            .with_payload(DatasetKey::Daily, json!({ "movies": [2] }));

        assert_eq!(
            payloads.get(DatasetKey::Daily),
            Some(&json!({ "movies": [2] }))
        );
    }
}
