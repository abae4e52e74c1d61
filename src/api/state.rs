use crate::{models::ApiKey, services::Recommender};

/// Shared application state
///
/// Only collaborator handles and settings live here; no request data is kept
/// between calls.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    /// Server-wide completion credential, used when a request brings none
    pub credential: Option<ApiKey>,
}

impl AppState {
    pub fn new(recommender: Recommender, credential: Option<ApiKey>) -> Self {
        Self {
            recommender,
            credential,
        }
    }
}
