use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Could not generate any questions from the supplied text")]
    NoQuestions,
}

pub type QuizResult<T> = Result<T, QuizError>;
