use std::fmt;

use serde::{Deserialize, Serialize};

/// Uppercase letter identifying an option. Generators never produce more
/// than six options, so F is the ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl AnswerLetter {
    pub const ALL: [AnswerLetter; 6] = [
        AnswerLetter::A,
        AnswerLetter::B,
        AnswerLetter::C,
        AnswerLetter::D,
        AnswerLetter::E,
        AnswerLetter::F,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(AnswerLetter::A),
            'B' => Some(AnswerLetter::B),
            'C' => Some(AnswerLetter::C),
            'D' => Some(AnswerLetter::D),
            'E' => Some(AnswerLetter::E),
            'F' => Some(AnswerLetter::F),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_char(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
}

/// One quiz question. `answer` is None when no answer key could be
/// determined; such questions are displayable but not gradeable.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub answer: Option<AnswerLetter>,
    pub kind: QuestionKind,
}

impl Question {
    pub fn multiple_choice(
        text: impl Into<String>,
        options: Vec<String>,
        answer: Option<AnswerLetter>,
    ) -> Self {
        Question {
            text: text.into(),
            options,
            answer,
            kind: QuestionKind::MultipleChoice,
        }
    }

    pub fn true_false(text: impl Into<String>, answer: AnswerLetter) -> Self {
        Question {
            text: text.into(),
            options: vec!["True".to_string(), "False".to_string()],
            answer: Some(answer),
            kind: QuestionKind::TrueFalse,
        }
    }

    /// Key used to deduplicate questions within one quiz.
    pub fn dedup_key(&self) -> String {
        self.text.trim().to_lowercase()
    }

    pub fn is_gradeable(&self) -> bool {
        self.answer
            .map(|letter| letter.index() < self.options.len())
            .unwrap_or(false)
    }

    /// Text of the option the answer letter points at.
    pub fn correct_option(&self) -> Option<&str> {
        let letter = self.answer?;
        self.options.get(letter.index()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_letter_maps_between_index_and_char() {
        assert_eq!(AnswerLetter::from_index(0), Some(AnswerLetter::A));
        assert_eq!(AnswerLetter::from_index(5), Some(AnswerLetter::F));
        assert_eq!(AnswerLetter::from_index(6), None);
        assert_eq!(AnswerLetter::from_char('b'), Some(AnswerLetter::B));
        assert_eq!(AnswerLetter::from_char('G'), None);
        assert_eq!(AnswerLetter::D.as_char(), 'D');
        assert_eq!(AnswerLetter::C.index(), 2);
    }

    #[test]
    fn true_false_questions_carry_fixed_options() {
        let question = Question::true_false("Water boils.", AnswerLetter::A);
        assert_eq!(question.options, vec!["True", "False"]);
        assert_eq!(question.kind, QuestionKind::TrueFalse);
        assert!(question.is_gradeable());
    }

    #[test]
    fn correct_option_follows_the_answer_letter() {
        let question = Question::multiple_choice(
            "Fill in the blank: the ____ is bright.",
            vec!["Moon".into(), "Star".into(), "Lamp".into(), "Fire".into()],
            Some(AnswerLetter::B),
        );
        assert_eq!(question.correct_option(), Some("Star"));
    }

    #[test]
    fn questions_without_answer_are_not_gradeable() {
        let question =
            Question::multiple_choice("Pick one.", vec!["x".into(), "y".into()], None);
        assert!(!question.is_gradeable());
        assert_eq!(question.correct_option(), None);
    }

    #[test]
    fn dedup_key_ignores_case_and_surrounding_whitespace() {
        let a = Question::multiple_choice("  The Sun rises.  ", vec!["x".into(), "y".into()], None);
        let b = Question::multiple_choice("the sun rises.", vec!["x".into(), "y".into()], None);
        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
