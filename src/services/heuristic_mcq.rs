use std::collections::HashSet;

use crate::models::domain::{AnswerLetter, Difficulty, Question};
use crate::random::RandomSource;
use crate::services::sentences::{split_sentences, SentenceWindow};
use crate::services::vocabulary;

/// Sentence length bounds for the primary fill-in-the-blank pass.
const SENTENCE_WINDOW: SentenceWindow = SentenceWindow::new(30, 240);

/// How many distractors accompany the correct option.
const DISTRACTOR_COUNT: usize = 3;

/// Cap on the length-matched distractor pool before shuffling.
const POOL_CAP: usize = 50;

/// Builds fill-in-the-blank MCQs by blanking a frequent or significant word
/// out of each qualifying sentence and surrounding it with distractors of
/// similar length. Returns fewer than `desired` when the text runs out of
/// qualifying sentences or vocabulary; that is expected, not an error.
pub fn generate_heuristic_mcqs(
    text: &str,
    desired: usize,
    difficulty: Difficulty,
    rng: &mut RandomSource,
) -> Vec<Question> {
    if text.trim().is_empty() || desired == 0 {
        return Vec::new();
    }

    let sentences = split_sentences(text, SENTENCE_WINDOW);
    let candidates = vocabulary::candidate_vocabulary(text, difficulty);
    if sentences.is_empty() || candidates.is_empty() {
        return Vec::new();
    }
    let candidate_set: HashSet<&str> = candidates.iter().map(String::as_str).collect();

    let mut used_sentences: HashSet<&str> = HashSet::new();
    let mut questions = Vec::new();

    for sentence in &sentences {
        if questions.len() >= desired {
            break;
        }
        // each sentence contributes at most one question
        if !used_sentences.insert(sentence.as_str()) {
            continue;
        }

        let Some(target) = vocabulary::blank_target(sentence, &candidate_set) else {
            continue;
        };
        let Some(blanked) = vocabulary::blank_out(sentence, &target) else {
            continue;
        };

        let distractors = pick_distractors(&candidates, &target, difficulty, rng);
        if distractors.len() < DISTRACTOR_COUNT {
            continue;
        }

        let mut options: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT + 1);
        options.push(vocabulary::capitalize_first(&target));
        options.extend(distractors.iter().map(|word| vocabulary::capitalize_first(word)));
        rng.shuffle(&mut options);

        // falls back to A when the shuffled correct option cannot be located
        let answer_index = options
            .iter()
            .position(|option| option.eq_ignore_ascii_case(&target))
            .unwrap_or(0);
        let answer = AnswerLetter::from_index(answer_index).unwrap_or(AnswerLetter::A);

        questions.push(Question::multiple_choice(
            format!("Fill in the blank: {}", blanked),
            options,
            Some(answer),
        ));
    }

    questions
}

/// Retries generation across relaxing difficulty tiers, accumulating and
/// deduplicating by question text until the quota is met or every tier is
/// exhausted.
pub fn generate_heuristic_mcqs_flexible(
    text: &str,
    desired: usize,
    difficulty: Difficulty,
    rng: &mut RandomSource,
) -> Vec<Question> {
    if desired == 0 {
        return Vec::new();
    }

    let mut tiers = vec![difficulty];
    for tier in [Difficulty::Medium, Difficulty::Easy] {
        if !tiers.contains(&tier) {
            tiers.push(tier);
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut questions: Vec<Question> = Vec::new();
    for tier in tiers {
        if questions.len() >= desired {
            break;
        }
        let batch = generate_heuristic_mcqs(text, desired - questions.len(), tier, rng);
        log::debug!("heuristic tier {} produced {} questions", tier, batch.len());
        for question in batch {
            if !seen.insert(question.dedup_key()) {
                continue;
            }
            questions.push(question);
            if questions.len() >= desired {
                break;
            }
        }
    }
    questions
}

/// Prefers candidate words close in length to the correct one, padding from
/// the rest of the vocabulary when the length-matched pool runs short.
fn pick_distractors(
    candidates: &[String],
    correct: &str,
    difficulty: Difficulty,
    rng: &mut RandomSource,
) -> Vec<String> {
    let tolerance = difficulty.distractor_length_tolerance();

    let mut pool: Vec<&String> = candidates
        .iter()
        .filter(|word| {
            word.as_str() != correct && word.len().abs_diff(correct.len()) <= tolerance
        })
        .collect();
    pool.truncate(POOL_CAP);
    rng.shuffle(&mut pool);

    let mut picks: Vec<String> = pool
        .into_iter()
        .take(DISTRACTOR_COUNT)
        .cloned()
        .collect();

    if picks.len() < DISTRACTOR_COUNT {
        let mut extras: Vec<&String> = candidates
            .iter()
            .filter(|word| {
                word.as_str() != correct && !picks.iter().any(|picked| picked == *word)
            })
            .collect();
        rng.shuffle(&mut extras);
        picks.extend(
            extras
                .into_iter()
                .take(DISTRACTOR_COUNT - picks.len())
                .cloned(),
        );
    }

    picks.truncate(DISTRACTOR_COUNT);
    picks
}
