use serde::Serialize;

use super::MovieRecord;

/// Which storyline text was picked to describe a movie to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorylineChoice {
    Synopsis(String),
    Plot(String),
    Unavailable,
}

impl StorylineChoice {
    /// The basis this choice prompts with, `None` when there is nothing to prompt with
    pub fn basis(&self) -> Option<StorylineBasis> {
        match self {
            StorylineChoice::Synopsis(_) => Some(StorylineBasis::Synopsis),
            StorylineChoice::Plot(_) => Some(StorylineBasis::Plot),
            StorylineChoice::Unavailable => None,
        }
    }
}

/// Source of the storyline a recommendation was prompted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorylineBasis {
    Synopsis,
    Plot,
}

impl StorylineBasis {
    /// Number of similar movies the prompt asks for
    pub fn result_count(self) -> usize {
        match self {
            StorylineBasis::Synopsis => 10,
            StorylineBasis::Plot => 3,
        }
    }

    /// Heading shown above the model's answer
    pub fn heading(self) -> &'static str {
        match self {
            StorylineBasis::Synopsis => "Similar Movie Recommendations (Based on Synopsis):",
            StorylineBasis::Plot => "Similar Movie Recommendations (Based on Plot):",
        }
    }
}

/// A fully substituted prompt, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationPrompt {
    basis: StorylineBasis,
    text: String,
}

impl RecommendationPrompt {
    pub(crate) fn new(basis: StorylineBasis, text: String) -> Self {
        Self { basis, text }
    }

    pub fn basis(&self) -> StorylineBasis {
        self.basis
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Model answer for one prompt. `text` is opaque and never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationText {
    pub basis: StorylineBasis,
    pub text: String,
}

/// Outcome of a full lookup-and-recommend request
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie: MovieRecord,
    pub basis: StorylineBasis,
    pub recommendations: String,
}
