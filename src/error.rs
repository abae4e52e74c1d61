use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
///
/// Every variant is user-facing: its `Display` text is what the terminal
/// session prints and what the HTTP surface returns as `message`.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Please enter your API key to proceed.")]
    MissingCredential,

    #[error("Please provide both movie name and year.")]
    MissingInput,

    #[error("{0}")]
    InvalidInput(String),

    #[error("No matching movie found for the given name and year.")]
    NotFound,

    #[error("Movie database lookup failed: {0}")]
    Provider(String),

    #[error("No storyline or plot available for the selected movie.")]
    NoStoryline,

    #[error("An error occurred: {0}")]
    Invocation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable name for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingCredential => "missing_credential",
            AppError::MissingInput => "missing_input",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound => "not_found",
            AppError::Provider(_) => "provider_error",
            AppError::NoStoryline => "no_storyline",
            AppError::Invocation(_) => "invocation_error",
            AppError::Config(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential => StatusCode::UNAUTHORIZED,
            AppError::MissingInput | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::NoStoryline => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Provider(_) | AppError::Invocation(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Transport failures talking to the metadata provider.
///
/// The completion client maps its own reqwest errors into `Invocation`, so this
/// conversion is only reached from provider code. The request URL is dropped
/// because OMDb carries its API key in the query string.
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Provider(err.without_url().to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
