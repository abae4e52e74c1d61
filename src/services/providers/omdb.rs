/// OMDb API provider
///
/// API Flow:
/// 1. Title Search: `/?s=<title>&type=movie&page=<n>` → IMDb IDs with release years
/// 2. Details: `/?i=<imdbID>&plot=<full|short>` → plot, rating and genres
///
/// OMDb reports most failures as HTTP 200 with `"Response": "False"`, so both
/// the status code and the body flag are checked.
use crate::{
    error::{AppError, AppResult},
    models::{MovieCandidate, MovieId, MovieRecord, OmdbMovieDetails, OmdbSearchResponse, PlotDepth},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

/// OMDb error texts that mean "no results" rather than a failed lookup
const EMPTY_RESULT_ERRORS: [&str; 2] = ["Movie not found!", "Too many results."];

/// OMDb returns search results ten at a time
const SEARCH_PAGE_SIZE: usize = 10;

/// Pages scanned per search, giving up to 20 candidates
const MAX_SEARCH_PAGES: usize = 2;

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    plot_depth: PlotDepth,
}

impl OmdbProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        plot_depth: PlotDepth,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build OMDb client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            plot_depth,
        })
    }

    /// Sends a query and returns the raw body of a successful response
    async fn get(&self, params: &[(&str, &str)]) -> AppResult<String> {
        let url = format!("{}/", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.text().await?)
    }

    /// Parses one search page into candidates plus the size of the whole result set
    fn parse_search(body: &str) -> AppResult<(Vec<MovieCandidate>, usize)> {
        let response: OmdbSearchResponse = serde_json::from_str(body).map_err(|e| {
            tracing::error!(error = %e, response = %body, "Failed to deserialize OMDb search response");
            AppError::Provider(format!("Failed to parse OMDb response: {}", e))
        })?;

        if !response.is_success() {
            let error = response.error.unwrap_or_default();
            if EMPTY_RESULT_ERRORS.contains(&error.as_str()) {
                return Ok((Vec::new(), 0));
            }
            return Err(AppError::Provider(format!("OMDb search failed: {}", error)));
        }

        let total = response.total();
        let candidates = response
            .search
            .into_iter()
            .map(MovieCandidate::from)
            .collect();

        Ok((candidates, total))
    }

    fn parse_details(body: &str, id: &MovieId, depth: PlotDepth) -> AppResult<MovieRecord> {
        let details: OmdbMovieDetails = serde_json::from_str(body).map_err(|e| {
            tracing::error!(error = %e, response = %body, "Failed to deserialize OMDb details response");
            AppError::Provider(format!("Failed to parse OMDb response: {}", e))
        })?;

        if !details.is_success() {
            return Err(AppError::Provider(format!(
                "OMDb details lookup for {} failed: {}",
                id,
                details.error.unwrap_or_default()
            )));
        }

        Ok(details.into_record(id.clone(), depth))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for OmdbProvider {
    async fn search_movies(&self, title: &str) -> AppResult<Vec<MovieCandidate>> {
        if title.trim().is_empty() {
            return Err(AppError::MissingInput);
        }

        let mut candidates = Vec::new();
        for page in 1..=MAX_SEARCH_PAGES {
            let page_param = page.to_string();
            let body = self
                .get(&[("s", title), ("type", "movie"), ("page", page_param.as_str())])
                .await?;
            let (results, total) = Self::parse_search(&body)?;
            candidates.extend(results);

            if page * SEARCH_PAGE_SIZE >= total {
                break;
            }
        }

        tracing::info!(
            title = %title,
            results = candidates.len(),
            provider = self.name(),
            "Movie search completed"
        );

        Ok(candidates)
    }

    async fn fetch_details(&self, id: &MovieId) -> AppResult<MovieRecord> {
        let body = self
            .get(&[("i", id.as_str()), ("plot", self.plot_depth.as_param())])
            .await?;
        tracing::debug!(response = %body, "Raw OMDb details response");

        let record = Self::parse_details(&body, id, self.plot_depth)?;

        tracing::info!(
            movie_id = %id,
            title = %record.title,
            has_synopsis = record.synopsis.is_some(),
            plot_entries = record.plot.len(),
            genres = record.genres.len(),
            provider = self.name(),
            "Movie details fetched"
        );

        Ok(record)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    const KEY: &str = "SECRET_OMDB_KEY";

    fn provider_at(api_url: &str) -> OmdbProvider {
        OmdbProvider::new(
            KEY.to_string(),
            api_url.to_string(),
            PlotDepth::Full,
            Duration::from_secs(2),
        )
        .unwrap()
    }

    /// Serves `app` on an ephemeral local port and returns its base URL
    async fn spawn_omdb(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn search_page(ids: std::ops::Range<usize>, year: &str, total: usize) -> Value {
        let items: Vec<Value> = ids
            .map(|i| json!({"Title": "Inception", "Year": year, "imdbID": format!("tt{:07}", i), "Type": "movie"}))
            .collect();
        json!({"Search": items, "totalResults": total.to_string(), "Response": "True"})
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let provider = OmdbProvider::new(
            "test_key".to_string(),
            "http://test.local/".to_string(),
            PlotDepth::Full,
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(provider.api_url, "http://test.local");
        assert_eq!(provider.name(), "omdb");
    }

    #[test]
    fn test_parse_search_preserves_provider_order() {
        let body = r#"{
            "Search": [
                {"Title": "Inception", "Year": "2005", "imdbID": "tt0000001", "Type": "movie"},
                {"Title": "Inception", "Year": "2010", "imdbID": "tt1375666", "Type": "movie"},
                {"Title": "Inception", "Year": "2010", "imdbID": "tt0000003", "Type": "movie"}
            ],
            "totalResults": "3",
            "Response": "True"
        }"#;

        let (candidates, total) = OmdbProvider::parse_search(body).unwrap();
        assert_eq!(total, 3);
        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["tt0000001", "tt1375666", "tt0000003"]);
        assert_eq!(candidates[0].year, Some(2005));
    }

    #[test]
    fn test_parse_search_not_found_is_empty() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        assert_eq!(OmdbProvider::parse_search(body).unwrap(), (Vec::new(), 0));

        let body = r#"{"Response": "False", "Error": "Too many results."}"#;
        assert_eq!(OmdbProvider::parse_search(body).unwrap(), (Vec::new(), 0));
    }

    #[test]
    fn test_parse_search_api_error_is_provider_error() {
        let body = r#"{"Response": "False", "Error": "Invalid API key!"}"#;
        let result = OmdbProvider::parse_search(body);
        assert!(matches!(result, Err(AppError::Provider(msg)) if msg.contains("Invalid API key!")));
    }

    #[test]
    fn test_parse_search_malformed_body() {
        let result = OmdbProvider::parse_search("<html>Service Unavailable</html>");
        assert!(matches!(result, Err(AppError::Provider(_))));
    }

    #[test]
    fn test_parse_details() {
        let body = r#"{
            "Title": "Inception",
            "Year": "2010",
            "Genre": "Action, Sci-Fi",
            "Plot": "Dom Cobb is a skilled thief.",
            "imdbRating": "8.8",
            "Response": "True"
        }"#;
        let id = MovieId::from("tt1375666");

        let record = OmdbProvider::parse_details(body, &id, PlotDepth::Short).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.plot, vec!["Dom Cobb is a skilled thief."]);
        assert_eq!(record.rating, Some(8.8));
        assert_eq!(record.genres, vec!["Action", "Sci-Fi"]);
    }

    #[test]
    fn test_parse_details_error_response() {
        let body = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;
        let result = OmdbProvider::parse_details(body, &MovieId::from("tt0"), PlotDepth::Full);
        assert!(matches!(result, Err(AppError::Provider(msg)) if msg.contains("Incorrect IMDb ID.")));
    }

    #[test]
    fn test_search_rejects_blank_title_without_request() {
        let provider = OmdbProvider::new(
            "test_key".to_string(),
            "http://test.local".to_string(),
            PlotDepth::Full,
            Duration::from_secs(5),
        )
        .unwrap();

        let result = tokio_test::block_on(provider.search_movies("   "));
        assert!(matches!(result, Err(AppError::MissingInput)));
    }

    #[tokio::test]
    async fn test_transport_failure_hides_api_key() {
        let result = provider_at("http://127.0.0.1:9").search_movies("Inception").await;

        match result {
            Err(err @ AppError::Provider(_)) => {
                let shown = err.to_string();
                assert!(shown.starts_with("Movie database lookup failed:"));
                assert!(!shown.contains(KEY), "key leaked: {}", shown);
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_is_provider_error() {
        let app = Router::new().route(
            "/",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream down") }),
        );
        let provider = provider_at(&spawn_omdb(app).await);

        let result = provider.fetch_details(&MovieId::from("tt1375666")).await;

        match result {
            Err(AppError::Provider(msg)) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("upstream down"));
                assert!(!msg.contains(KEY));
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_reads_second_page() {
        let app = Router::new().route(
            "/",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("apikey").map(String::as_str), Some(KEY));
                assert_eq!(params.get("type").map(String::as_str), Some("movie"));
                match params.get("page").map(String::as_str) {
                    Some("1") => Json(search_page(0..10, "2005", 14)),
                    Some("2") => Json(search_page(10..14, "2010", 14)),
                    other => panic!("unexpected page {:?}", other),
                }
            }),
        );
        let provider = provider_at(&spawn_omdb(app).await);

        let candidates = provider.search_movies("Inception").await.unwrap();

        assert_eq!(candidates.len(), 14);
        assert_eq!(candidates[0].id.as_str(), "tt0000000");
        assert_eq!(candidates[10].id.as_str(), "tt0000010");
        assert_eq!(candidates[10].year, Some(2010));
    }

    #[tokio::test]
    async fn test_search_stops_after_last_page() {
        let app = Router::new().route(
            "/",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                match params.get("page").map(String::as_str) {
                    Some("1") => Json(search_page(0..3, "2010", 3)),
                    other => panic!("unexpected page {:?}", other),
                }
            }),
        );
        let provider = provider_at(&spawn_omdb(app).await);

        let candidates = provider.search_movies("Inception").await.unwrap();
        assert_eq!(candidates.len(), 3);
    }
}
