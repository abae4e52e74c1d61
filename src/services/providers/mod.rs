/// Movie metadata provider abstraction
///
/// A provider answers two questions: which movies match a title, and what the
/// full record for one of them looks like. The resolver only ever fetches the
/// record of the candidate it selects, so implementations should keep the two
/// calls separate rather than eagerly loading details during search.
use crate::{
    error::AppResult,
    models::{MovieCandidate, MovieId, MovieRecord},
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search for movies by title
    ///
    /// Results must be returned in the provider's own order, which callers treat
    /// as a relevance rank. An empty vector means nothing matched; transport or
    /// decoding failures are `AppError::Provider`.
    async fn search_movies(&self, title: &str) -> AppResult<Vec<MovieCandidate>>;

    /// Fetch the full record for one search result
    async fn fetch_details(&self, id: &MovieId) -> AppResult<MovieRecord>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
