use crate::{
    error::{AppError, AppResult},
    models::{MovieQuery, MovieRecord},
    services::providers::MetadataProvider,
};

/// Resolves a title + year to exactly one movie record
///
/// Candidates are scanned in provider order and the first one whose year equals
/// the requested year is taken. There is no tolerance window and no re-ranking:
/// a 2009 candidate never satisfies a 2010 query. Details are fetched for the
/// selected candidate only.
pub async fn resolve(provider: &dyn MetadataProvider, query: &MovieQuery) -> AppResult<MovieRecord> {
    let candidates = provider.search_movies(query.title()).await?;

    let Some(candidate) = candidates
        .iter()
        .find(|candidate| candidate.year == Some(query.year()))
    else {
        tracing::info!(
            title = %query.title(),
            year = query.year(),
            candidates = candidates.len(),
            provider = provider.name(),
            "No candidate matched the requested year"
        );
        return Err(AppError::NotFound);
    };

    tracing::info!(
        title = %query.title(),
        year = query.year(),
        movie_id = %candidate.id,
        candidates = candidates.len(),
        provider = provider.name(),
        "Resolved movie"
    );

    provider.fetch_details(&candidate.id).await
}
