mod handlers;
mod routes;
mod state;

pub use handlers::{RecommendationRequest, RecommendationResponse};
pub use routes::create_router;
pub use state::AppState;
