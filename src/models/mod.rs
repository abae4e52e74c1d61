use serde::Deserialize;

mod movie;
mod recommendation;

pub use movie::{
    latest_release_year, ApiKey, MovieCandidate, MovieId, MovieQuery, MovieRecord,
    EARLIEST_RELEASE_YEAR,
};
pub use recommendation::{
    Recommendation, RecommendationPrompt, RecommendationText, StorylineBasis, StorylineChoice,
};

/// OMDb plot length to request with movie details
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotDepth {
    /// Long-form summary, treated as the movie's synopsis
    #[default]
    Full,
    /// One-paragraph summary, treated as a plot entry
    Short,
}

impl PlotDepth {
    pub fn as_param(self) -> &'static str {
        match self {
            PlotDepth::Full => "full",
            PlotDepth::Short => "short",
        }
    }
}

// ============================================================================
// OMDb API Types
// ============================================================================

/// OMDb marks missing fields with this literal
const OMDB_MISSING: &str = "N/A";

/// Raw response from `?s=<title>`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbSearchResponse {
    #[serde(default)]
    pub search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    pub response: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl OmdbSearchResponse {
    pub fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    /// Size of the whole result set across pages, falling back to this page's length
    pub fn total(&self) -> usize {
        self.total_results
            .as_deref()
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(self.search.len())
    }
}

/// One row of an OMDb search result
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbSearchItem {
    pub title: String,
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
}

impl From<OmdbSearchItem> for MovieCandidate {
    fn from(item: OmdbSearchItem) -> Self {
        MovieCandidate {
            id: MovieId(item.imdb_id),
            year: parse_year(&item.year),
            title: item.title,
        }
    }
}

/// Raw response from `?i=<imdbID>`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovieDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    pub response: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl OmdbMovieDetails {
    pub fn is_success(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    /// Converts to a record, placing the plot text according to the requested depth
    pub fn into_record(self, id: MovieId, depth: PlotDepth) -> MovieRecord {
        let text = present(self.plot);
        let (synopsis, plot) = match depth {
            PlotDepth::Full => (text, Vec::new()),
            PlotDepth::Short => (None, text.into_iter().collect()),
        };

        let genres = present(self.genre)
            .map(|genres| {
                genres
                    .split(',')
                    .map(str::trim)
                    .filter(|g| !g.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        MovieRecord {
            id,
            title: present(self.title).unwrap_or_default(),
            year: present(self.year).as_deref().and_then(parse_year),
            synopsis,
            plot,
            rating: present(self.imdb_rating).and_then(|r| r.parse().ok()),
            genres,
        }
    }
}

/// Drops OMDb's "N/A" placeholder and blank strings
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| {
        let v = v.trim();
        !v.is_empty() && v != OMDB_MISSING
    })
}

/// Reads the leading four-digit year from values like "2010" or "2010–2012"
fn parse_year(value: &str) -> Option<i32> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    if digits.len() != 4 {
        return None;
    }
    digits.parse().ok()
}
