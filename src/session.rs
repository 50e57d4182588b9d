use crate::errors::QuizResult;
use crate::models::domain::{QuizRequest, QuizSet};
use crate::random::RandomSource;
use crate::services::quiz_builder;

/// Holds the extracted text of one uploaded document for the lifetime of a
/// session. Every quiz is recomputed from this text; nothing is cached or
/// shared between calls.
#[derive(Clone, Debug)]
pub struct QuizSession {
    source_text: String,
}

impl QuizSession {
    pub fn new(source_text: impl Into<String>) -> Self {
        QuizSession {
            source_text: source_text.into(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn build_quiz(
        &self,
        request: &QuizRequest,
        rng: &mut RandomSource,
    ) -> QuizResult<QuizSet> {
        quiz_builder::build_quiz(&self.source_text, request, rng)
    }
}
