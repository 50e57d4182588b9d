use serde::{Deserialize, Serialize};

use crate::errors::{QuizError, QuizResult};
use crate::models::domain::{AnswerLetter, QuizSet};

/// Outcome of grading one submission. `gradeable` counts the questions that
/// carry an answer key; the rest still count toward `total` but can never
/// score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GradeReport {
    pub correct: usize,
    pub gradeable: usize,
    pub total: usize,
}

/// One line of the printable answer key.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerKeyEntry {
    /// 1-based question number.
    pub number: usize,
    pub letter: Option<AnswerLetter>,
    pub option_text: Option<String>,
}

/// Grades one selected letter per question. Questions without an answer key
/// or without a selection are skipped.
pub fn grade(quiz: &QuizSet, responses: &[Option<AnswerLetter>]) -> QuizResult<GradeReport> {
    if responses.len() != quiz.questions.len() {
        return Err(QuizError::ValidationError(format!(
            "expected {} responses, got {}",
            quiz.questions.len(),
            responses.len()
        )));
    }

    let mut report = GradeReport {
        total: quiz.questions.len(),
        ..GradeReport::default()
    };
    for (question, response) in quiz.questions.iter().zip(responses) {
        let Some(answer) = question.answer else {
            continue;
        };
        report.gradeable += 1;
        if *response == Some(answer) {
            report.correct += 1;
        }
    }
    Ok(report)
}

/// Derives the exportable answer key: per question, the answer letter and
/// the text of the option it points at. Entries for ungradeable questions
/// carry neither.
pub fn answer_key(quiz: &QuizSet) -> Vec<AnswerKeyEntry> {
    quiz.questions
        .iter()
        .enumerate()
        .map(|(i, question)| AnswerKeyEntry {
            number: i + 1,
            letter: question.answer,
            option_text: question.correct_option().map(str::to_string),
        })
        .collect()
}
