use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        ApiKey, MovieQuery, Recommendation, RecommendationText, StorylineBasis, StorylineChoice,
    },
    services::{
        completion::{CompletionRequest, CompletionService},
        prompt,
        providers::MetadataProvider,
        resolver, storyline,
    },
};

/// Runs the lookup → storyline → prompt → completion chain
///
/// Holds no request state: each call resolves, prompts and invokes from
/// scratch, so two identical calls reach the completion service twice.
#[derive(Clone)]
pub struct Recommender {
    provider: Arc<dyn MetadataProvider>,
    completion: Arc<dyn CompletionService>,
    model: String,
}

impl Recommender {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        completion: Arc<dyn CompletionService>,
        model: String,
    ) -> Self {
        Self {
            provider,
            completion,
            model,
        }
    }

    /// Resolves the queried movie and asks the model for similar titles
    pub async fn recommend(
        &self,
        query: &MovieQuery,
        credential: &ApiKey,
    ) -> AppResult<Recommendation> {
        let movie = resolver::resolve(self.provider.as_ref(), query).await?;
        let choice = storyline::select(&movie);

        let answer = self
            .compose_and_invoke(&choice, movie.rating, &movie.genres, credential)
            .await?;

        Ok(Recommendation {
            movie,
            basis: answer.basis,
            recommendations: answer.text,
        })
    }

    /// Builds the prompt for `choice` and sends it once.
    ///
    /// `Unavailable` fails with `NoStoryline` before anything is sent. The
    /// answer is trimmed and otherwise returned untouched.
    pub async fn compose_and_invoke(
        &self,
        choice: &StorylineChoice,
        rating: Option<f64>,
        genres: &[String],
        credential: &ApiKey,
    ) -> AppResult<RecommendationText> {
        let (basis, storyline) = match choice {
            StorylineChoice::Synopsis(text) => (StorylineBasis::Synopsis, text),
            StorylineChoice::Plot(text) => (StorylineBasis::Plot, text),
            StorylineChoice::Unavailable => return Err(AppError::NoStoryline),
        };

        let prompt = prompt::compose(basis, storyline, rating, genres);

        tracing::info!(
            basis = ?basis,
            model = %self.model,
            service = self.completion.name(),
            "Requesting similar movie recommendations"
        );

        let answer = self
            .completion
            .complete(CompletionRequest {
                prompt: prompt.text().to_string(),
                model: self.model.clone(),
                credential: credential.clone(),
            })
            .await?;

        Ok(RecommendationText {
            basis: prompt.basis(),
            text: answer.trim().to_string(),
        })
    }
}
