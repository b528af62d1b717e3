//! Data models for catalog entries and dataset identities.
//!
//! `Movie` is the uniform item the carousel works with. The catalog returns
//! several historical shapes for the same entry (box-office rows, synced
//! film-database rows, paged listing rows), so deserialisation goes through
//! the internal `ApiMovie` target and is folded into the public type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::CatalogError;

/// Identifies one of the three carousel data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKey {
    /// Daily box-office ranking, delivered in a single response.
    Daily,
    /// Movies currently in cinemas, delivered in pages.
    NowPlaying,
    /// Movies opening soon, delivered in pages.
    Upcoming,
}

impl DatasetKey {
    /// All dataset keys in tab order.
    pub const ALL: [Self; 3] = [Self::Daily, Self::NowPlaying, Self::Upcoming];

    /// Returns the stable wire name of the dataset.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::NowPlaying => "now-playing",
            Self::Upcoming => "upcoming",
        }
    }

    /// Returns the payload field that holds this dataset's item list.
    ///
    /// The sources do not share a shape: the box-office response wraps its
    /// rows in `movies`, the paged listings use the page envelope's `content`.
    #[must_use]
    pub const fn items_field(self) -> &'static str {
        match self {
            Self::Daily => "movies",
            Self::NowPlaying | Self::Upcoming => "content",
        }
    }

    /// Returns true when the dataset can grow through "load more".
    #[must_use]
    pub const fn is_pageable(self) -> bool {
        matches!(self, Self::NowPlaying | Self::Upcoming)
    }

    /// Returns the heading shown when the dataset is active.
    #[must_use]
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::Daily => "Daily box office",
            Self::NowPlaying => "Now playing",
            Self::Upcoming => "Coming soon",
        }
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKey {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| CatalogError::Configuration {
                message: format!(
                    "unknown dataset '{value}' (expected daily, now-playing or upcoming)"
                ),
            })
    }
}

/// A catalog entry shown as one carousel card.
///
/// Identity is `id`, falling back to `movie_code` for box-office rows the
/// catalog could not match. Entries are never mutated after they are
/// received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ApiMovie")]
pub struct Movie {
    /// Catalog identifier, absent for unmatched box-office rows.
    pub id: Option<u64>,
    /// Box-office film code (`movieCd`), if the source carries one.
    pub movie_code: Option<String>,
    /// Chart position delivered by the daily ranking.
    pub rank: Option<u32>,
    /// Display title.
    pub title: String,
    /// Poster image URL, if the catalog has one.
    pub poster_url: Option<String>,
    /// Release date as delivered by the catalog (usually `YYYYMMDD` or ISO).
    pub release_date: Option<String>,
}

impl Movie {
    /// Creates a movie with only an identifier and title.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            movie_code: None,
            rank: None,
            title: title.into(),
            poster_url: None,
            release_date: None,
        }
    }

    /// Sets the poster URL.
    #[must_use]
    pub fn with_poster_url(mut self, poster_url: impl Into<String>) -> Self {
        self.poster_url = Some(poster_url.into());
        self
    }

    /// Sets the release date.
    #[must_use]
    pub fn with_release_date(mut self, release_date: impl Into<String>) -> Self {
        self.release_date = Some(release_date.into());
        self
    }

    /// Sets the chart position.
    #[must_use]
    pub const fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Returns the identity to show for the entry: the catalog id, else the
    /// box-office film code.
    #[must_use]
    pub fn identity(&self) -> Option<String> {
        self.id
            .map(|id| id.to_string())
            .or_else(|| self.movie_code.clone())
    }

    /// Returns the chart rank, or `position` when the source has none.
    #[must_use]
    pub fn display_rank(&self, position: usize) -> usize {
        self.rank
            .and_then(|rank| usize::try_from(rank).ok())
            .unwrap_or(position)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiMovie {
    #[serde(default, alias = "movieId")]
    id: Option<u64>,
    #[serde(default, alias = "movieCd", deserialize_with = "lenient_code")]
    movie_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_rank")]
    rank: Option<u32>,
    #[serde(default, alias = "movieNm")]
    title: Option<String>,
    poster: Option<String>,
    poster_url: Option<String>,
    /// Pipe-separated list of poster URLs from the film database.
    posters: Option<String>,
    release_date: Option<String>,
    open_dt: Option<String>,
    rep_rls_date: Option<String>,
}

impl TryFrom<ApiMovie> for Movie {
    type Error = String;

    fn try_from(api: ApiMovie) -> Result<Self, Self::Error> {
        let Some(title) = non_blank(api.title) else {
            return Err("catalog entry has no title".to_owned());
        };
        let first_listed_poster = api
            .posters
            .as_deref()
            .and_then(|posters| posters.split('|').map(str::trim).find(|p| !p.is_empty()))
            .map(ToOwned::to_owned);

        Ok(Self {
            id: api.id,
            movie_code: api.movie_code,
            rank: api.rank,
            title,
            poster_url: non_blank(api.poster)
                .or_else(|| non_blank(api.poster_url))
                .or(first_listed_poster),
            release_date: non_blank(api.release_date)
                .or_else(|| non_blank(api.open_dt))
                .or_else(|| non_blank(api.rep_rls_date)),
        })
    }
}

/// A scalar the catalog sends either as a JSON number or as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

fn lenient_rank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(value.and_then(|scalar| match scalar {
        NumberOrText::Number(number) => u32::try_from(number).ok(),
        NumberOrText::Text(text) => text.trim().parse().ok(),
    }))
}

fn lenient_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(value.and_then(|scalar| match scalar {
        NumberOrText::Number(number) => Some(number.to_string()),
        NumberOrText::Text(text) => non_blank(Some(text)),
    }))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
