use std::collections::HashSet;

#[cfg(test)]
use mockall::automock;

use crate::errors::{QuizError, QuizResult};
use crate::models::domain::{Difficulty, Question, QuizRequest, QuizSet, Shortfall};
use crate::random::RandomSource;
use crate::services::heuristic_mcq::generate_heuristic_mcqs_flexible;
use crate::services::structured_parser::parse_structured_questions;
use crate::services::true_false::generate_true_false_flexible;
use crate::services::ultra_fallback::generate_ultra_fallback_mcqs;

/// One tier of the MCQ cascade. Tiers are tried in order until the quota is
/// met; each may return fewer questions than asked for.
#[cfg_attr(test, automock)]
pub trait McqStrategy {
    fn name(&self) -> &'static str;

    fn generate(
        &self,
        text: &str,
        desired: usize,
        difficulty: Difficulty,
        rng: &mut RandomSource,
    ) -> Vec<Question>;
}

/// Recovers questions the text already spells out. Cheapest tier and the
/// best quality when the source is quiz-formatted.
pub struct StructuredParseStrategy;

impl McqStrategy for StructuredParseStrategy {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn generate(
        &self,
        text: &str,
        _desired: usize,
        _difficulty: Difficulty,
        _rng: &mut RandomSource,
    ) -> Vec<Question> {
        parse_structured_questions(text)
    }
}

/// Fill-in-the-blank generation with difficulty relaxation.
pub struct HeuristicStrategy;

impl McqStrategy for HeuristicStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn generate(
        &self,
        text: &str,
        desired: usize,
        difficulty: Difficulty,
        rng: &mut RandomSource,
    ) -> Vec<Question> {
        generate_heuristic_mcqs_flexible(text, desired, difficulty, rng)
    }
}

/// Last resort with minimal quality constraints.
pub struct UltraFallbackStrategy;

impl McqStrategy for UltraFallbackStrategy {
    fn name(&self) -> &'static str {
        "ultra-fallback"
    }

    fn generate(
        &self,
        text: &str,
        desired: usize,
        _difficulty: Difficulty,
        rng: &mut RandomSource,
    ) -> Vec<Question> {
        generate_ultra_fallback_mcqs(text, desired, rng)
    }
}

fn default_strategies() -> Vec<Box<dyn McqStrategy>> {
    vec![
        Box::new(StructuredParseStrategy),
        Box::new(HeuristicStrategy),
        Box::new(UltraFallbackStrategy),
    ]
}

/// Runs the strategies in order, deduplicating by question text against
/// `seen` and stopping as soon as `desired` questions are collected.
fn run_mcq_cascade(
    strategies: &[Box<dyn McqStrategy>],
    text: &str,
    desired: usize,
    difficulty: Difficulty,
    seen: &mut HashSet<String>,
    rng: &mut RandomSource,
) -> Vec<Question> {
    let mut questions = Vec::new();
    for strategy in strategies {
        if questions.len() >= desired {
            break;
        }
        let needed = desired - questions.len();
        let batch = strategy.generate(text, needed, difficulty, rng);
        log::debug!(
            "mcq strategy '{}' produced {} candidates for {} needed",
            strategy.name(),
            batch.len(),
            needed
        );
        for question in batch {
            if questions.len() >= desired {
                break;
            }
            if !seen.insert(question.dedup_key()) {
                continue;
            }
            questions.push(question);
        }
    }
    questions
}

/// Builds the full quiz: the MCQ cascade first, then the true/false
/// cascade, MCQs ahead of TF questions, one dedup set across everything.
/// Shortfalls are surfaced on the returned set rather than silently
/// truncated; producing nothing at all is the only error.
pub fn build_quiz(
    text: &str,
    request: &QuizRequest,
    rng: &mut RandomSource,
) -> QuizResult<QuizSet> {
    if request.mcq_count == 0 && request.tf_count == 0 {
        return Err(QuizError::ValidationError(
            "requested zero questions of both kinds".to_string(),
        ));
    }

    log::info!(
        "building quiz: {} MCQ, {} true/false, difficulty {}",
        request.mcq_count,
        request.tf_count,
        request.difficulty
    );

    let mut seen: HashSet<String> = HashSet::new();
    let mut questions: Vec<Question> = Vec::new();

    let mut mcq_generated = 0;
    if request.mcq_count > 0 {
        let mcqs = run_mcq_cascade(
            &default_strategies(),
            text,
            request.mcq_count,
            request.difficulty,
            &mut seen,
            rng,
        );
        mcq_generated = mcqs.len();
        questions.extend(mcqs);
    }

    let mut tf_generated = 0;
    if request.tf_count > 0 {
        for question in
            generate_true_false_flexible(text, request.tf_count, request.difficulty, rng)
        {
            if tf_generated >= request.tf_count {
                break;
            }
            if !seen.insert(question.dedup_key()) {
                continue;
            }
            questions.push(question);
            tf_generated += 1;
        }
    }

    if questions.is_empty() {
        return Err(QuizError::NoQuestions);
    }

    let missing = Shortfall {
        mcq_missing: request.mcq_count - mcq_generated,
        tf_missing: request.tf_count - tf_generated,
    };
    let shortfall = if missing.mcq_missing == 0 && missing.tf_missing == 0 {
        None
    } else {
        log::warn!(
            "quota shortfall: {} MCQ and {} true/false questions short",
            missing.mcq_missing,
            missing.tf_missing
        );
        Some(missing)
    };

    Ok(QuizSet::new(questions, shortfall))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::QuestionKind;
    use crate::test_utils::fixtures;

    fn stub_question(label: &str) -> Question {
        Question::multiple_choice(label, vec!["one".into(), "two".into()], None)
    }

    #[test]
    fn cascade_stops_once_the_quota_is_met() {
        let mut first = MockMcqStrategy::new();
        first.expect_name().return_const("first");
        first
            .expect_generate()
            .times(1)
            .returning(|_, desired, _, _| {
                (0..desired).map(|i| stub_question(&format!("q{}", i))).collect()
            });

        let mut second = MockMcqStrategy::new();
        second.expect_name().return_const("second");
        second.expect_generate().times(0);

        let strategies: Vec<Box<dyn McqStrategy>> = vec![Box::new(first), Box::new(second)];
        let mut seen = HashSet::new();
        let mut rng = fixtures::seeded_rng();

        let questions = run_mcq_cascade(
            &strategies,
            "irrelevant",
            3,
            Difficulty::Medium,
            &mut seen,
            &mut rng,
        );

        assert_eq!(questions.len(), 3);
    }

    #[test]
    fn cascade_escalates_and_deduplicates_across_tiers() {
        let mut first = MockMcqStrategy::new();
        first.expect_name().return_const("first");
        first
            .expect_generate()
            .times(1)
            .returning(|_, _, _, _| vec![stub_question("alpha"), stub_question("beta")]);

        let mut second = MockMcqStrategy::new();
        second.expect_name().return_const("second");
        second
            .expect_generate()
            .times(1)
            .returning(|_, _, _, _| {
                // "Alpha" collides with tier one after key normalization
                vec![stub_question("Alpha"), stub_question("gamma"), stub_question("delta")]
            });

        let strategies: Vec<Box<dyn McqStrategy>> = vec![Box::new(first), Box::new(second)];
        let mut seen = HashSet::new();
        let mut rng = fixtures::seeded_rng();

        let questions = run_mcq_cascade(
            &strategies,
            "irrelevant",
            4,
            Difficulty::Medium,
            &mut seen,
            &mut rng,
        );

        let texts: Vec<&str> = questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha", "beta", "gamma", "delta"]);
    }

    #[test]
    fn structured_text_is_parsed_before_heuristics_run() {
        let mut rng = fixtures::seeded_rng();
        let request = QuizRequest::new(1, 0, Difficulty::Medium);

        let quiz = build_quiz(fixtures::structured_quiz_text(), &request, &mut rng).unwrap();

        assert_eq!(quiz.len(), 1);
        assert_eq!(quiz.questions[0].text, "What is 2+2?");
        assert_eq!(quiz.questions[0].options, vec!["3", "4", "5", "6"]);
    }

    #[test]
    fn quota_is_met_exactly_when_the_text_suffices() {
        let mut rng = fixtures::seeded_rng();
        let request = QuizRequest::new(3, 3, Difficulty::Medium);

        let quiz = build_quiz(fixtures::prose_text(), &request, &mut rng).unwrap();

        assert_eq!(quiz.mcq_count(), 3);
        assert_eq!(quiz.tf_count(), 3);
        assert!(quiz.shortfall.is_none());

        // MCQs come before TF questions
        let kinds: Vec<QuestionKind> = quiz.questions.iter().map(|q| q.kind).collect();
        assert_eq!(
            kinds,
            vec![
                QuestionKind::MultipleChoice,
                QuestionKind::MultipleChoice,
                QuestionKind::MultipleChoice,
                QuestionKind::TrueFalse,
                QuestionKind::TrueFalse,
                QuestionKind::TrueFalse,
            ]
        );
    }

    #[test]
    fn shortfall_is_reported_when_the_text_runs_dry() {
        let mut rng = fixtures::seeded_rng();
        let request = QuizRequest::new(5, 5, Difficulty::Medium);

        let quiz = build_quiz(fixtures::single_sentence_text(), &request, &mut rng).unwrap();

        assert!(quiz.len() < request.total());
        let shortfall = quiz.shortfall.expect("shortfall should be surfaced");
        assert!(shortfall.mcq_missing > 0 || shortfall.tf_missing > 0);
    }

    #[test]
    fn no_questions_from_any_tier_is_an_error() {
        let mut rng = fixtures::seeded_rng();
        let request = QuizRequest::new(5, 5, Difficulty::Medium);

        let result = build_quiz("", &request, &mut rng);
        assert_eq!(result, Err(QuizError::NoQuestions));
    }

    #[test]
    fn zero_quota_request_is_rejected() {
        let mut rng = fixtures::seeded_rng();
        let request = QuizRequest::new(0, 0, Difficulty::Medium);

        let result = build_quiz(fixtures::prose_text(), &request, &mut rng);
        assert!(matches!(result, Err(QuizError::ValidationError(_))));
    }

    #[test]
    fn no_duplicate_question_text_within_one_quiz() {
        let mut rng = fixtures::seeded_rng();
        let request = QuizRequest::new(10, 10, Difficulty::Medium);

        let quiz = build_quiz(fixtures::prose_text(), &request, &mut rng).unwrap();

        let mut keys: Vec<String> = quiz.questions.iter().map(|q| q.dedup_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), quiz.len());
    }
}
