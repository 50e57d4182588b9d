use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::difficulty::Difficulty;
use crate::models::domain::question::{Question, QuestionKind};

/// How many questions of each kind the caller wants, and how strict
/// generation should be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizRequest {
    pub mcq_count: usize,
    pub tf_count: usize,
    pub difficulty: Difficulty,
}

impl QuizRequest {
    pub fn new(mcq_count: usize, tf_count: usize, difficulty: Difficulty) -> Self {
        QuizRequest {
            mcq_count,
            tf_count,
            difficulty,
        }
    }

    pub fn total(&self) -> usize {
        self.mcq_count + self.tf_count
    }
}

/// How far the generated quiz fell short of the requested counts, after
/// every fallback tier was exhausted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Shortfall {
    pub mcq_missing: usize,
    pub tf_missing: usize,
}

/// A generated quiz: multiple-choice questions first, then true/false, each
/// group in generation order. Rebuilt from scratch on every request.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizSet {
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortfall: Option<Shortfall>,
    pub generated_at: DateTime<Utc>,
}

impl QuizSet {
    pub fn new(questions: Vec<Question>, shortfall: Option<Shortfall>) -> Self {
        QuizSet {
            questions,
            shortfall,
            generated_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn mcq_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| q.kind == QuestionKind::MultipleChoice)
            .count()
    }

    pub fn tf_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| q.kind == QuestionKind::TrueFalse)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::question::AnswerLetter;

    #[test]
    fn quiz_set_counts_questions_by_kind() {
        let quiz = QuizSet::new(
            vec![
                Question::multiple_choice("q1", vec!["a".into(), "b".into()], None),
                Question::true_false("q2", AnswerLetter::A),
                Question::true_false("q3", AnswerLetter::B),
            ],
            None,
        );

        assert_eq!(quiz.len(), 3);
        assert_eq!(quiz.mcq_count(), 1);
        assert_eq!(quiz.tf_count(), 2);
        assert!(quiz.shortfall.is_none());
    }

    #[test]
    fn quiz_request_totals_both_kinds() {
        let request = QuizRequest::new(3, 5, Difficulty::Medium);
        assert_eq!(request.total(), 8);
    }
}
