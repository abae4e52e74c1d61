use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::{AppError, AppResult};

/// Earliest release year accepted from user input
pub const EARLIEST_RELEASE_YEAR: i32 = 1900;

/// Latest release year accepted from user input (the current year)
pub fn latest_release_year() -> i32 {
    Utc::now().year()
}

/// Provider-assigned movie identifier (an IMDb id for OMDb, e.g. "tt1375666")
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl MovieId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A validated title + year lookup built from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    title: String,
    year: i32,
}

impl MovieQuery {
    /// Builds a query, rejecting blank titles and implausible years
    pub fn new(title: &str, year: i32) -> AppResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::MissingInput);
        }

        let latest = latest_release_year();
        if !(EARLIEST_RELEASE_YEAR..=latest).contains(&year) {
            return Err(AppError::InvalidInput(format!(
                "Movie year must be between {} and {}",
                EARLIEST_RELEASE_YEAR, latest
            )));
        }

        Ok(Self {
            title: title.to_string(),
            year,
        })
    }

    /// Builds a query from raw text fields as typed by the user
    pub fn parse(title: &str, year: &str) -> AppResult<Self> {
        let year = year.trim();
        if title.trim().is_empty() || year.is_empty() {
            return Err(AppError::MissingInput);
        }

        let year: i32 = year.parse().map_err(|_| {
            AppError::InvalidInput(format!("Movie year must be a number, got '{}'", year))
        })?;

        Self::new(title, year)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

/// One entry of a provider search result
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCandidate {
    pub id: MovieId,
    pub title: String,
    /// Missing when the provider reports no usable year; such candidates never match
    pub year: Option<i32>,
}

/// Full metadata for a single resolved movie
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub year: Option<i32>,
    pub synopsis: Option<String>,
    /// Contributor plot summaries in provider order
    pub plot: Vec<String>,
    pub rating: Option<f64>,
    pub genres: Vec<String>,
}

/// Completion service credential.
///
/// Held in memory for one session only; `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for blank input
    pub fn new(key: &str) -> Option<Self> {
        let key = key.trim();
        (!key.is_empty()).then(|| Self(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
