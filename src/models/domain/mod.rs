pub mod difficulty;
pub mod question;
pub mod quiz;

pub use difficulty::Difficulty;
pub use question::{AnswerLetter, Question, QuestionKind};
pub use quiz::{QuizRequest, QuizSet, Shortfall};
