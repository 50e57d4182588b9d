use std::collections::HashSet;

use crate::models::domain::{AnswerLetter, Question};
use crate::random::RandomSource;
use crate::services::sentences::{split_sentences, SentenceWindow};
use crate::services::vocabulary;

/// Wider sentence bounds than the primary heuristic pass accepts.
const SENTENCE_WINDOW: SentenceWindow = SentenceWindow::new(20, 260);

/// How many distractors accompany the correct option.
const DISTRACTOR_COUNT: usize = 3;

/// Distractor length tolerance; fixed, no difficulty tuning here.
const LENGTH_TOLERANCE: usize = 4;

/// Placeholder options cycled in when the vocabulary runs dry.
const GENERIC_OPTIONS: [&str; 4] = ["Unknown", "N/A", "None of the above", "All of the above"];

/// Least selective MCQ tier, used only after structured parsing and the
/// flexible heuristic cascade have both come up short. Blanks the first
/// non-stop word of each sentence with no frequency requirement, and pads
/// distractors with generic placeholders when the text cannot supply three.
pub fn generate_ultra_fallback_mcqs(
    text: &str,
    desired: usize,
    rng: &mut RandomSource,
) -> Vec<Question> {
    if text.trim().is_empty() || desired == 0 {
        return Vec::new();
    }

    let sentences = split_sentences(text, SENTENCE_WINDOW);
    let vocab = vocabulary::full_vocabulary(text);

    let mut used_sentences: HashSet<&str> = HashSet::new();
    let mut seen_texts: HashSet<String> = HashSet::new();
    let mut questions = Vec::new();

    for sentence in &sentences {
        if questions.len() >= desired {
            break;
        }
        if !used_sentences.insert(sentence.as_str()) {
            continue;
        }

        let Some(target) = vocabulary::tokenize(sentence)
            .into_iter()
            .find(|word| !vocabulary::is_stop_word(word))
        else {
            continue;
        };
        let Some(blanked) = vocabulary::blank_out(sentence, &target) else {
            continue;
        };
        let key = blanked.to_lowercase();
        if seen_texts.contains(&key) {
            continue;
        }

        let mut pool: Vec<&String> = vocab
            .iter()
            .filter(|word| {
                word.as_str() != target && word.len().abs_diff(target.len()) <= LENGTH_TOLERANCE
            })
            .collect();
        rng.shuffle(&mut pool);
        let mut distractors: Vec<String> = pool
            .into_iter()
            .take(DISTRACTOR_COUNT)
            .cloned()
            .collect();

        if distractors.len() < DISTRACTOR_COUNT {
            let mut extras: Vec<&String> = vocab
                .iter()
                .filter(|word| {
                    word.as_str() != target
                        && !distractors.iter().any(|picked| picked == *word)
                })
                .collect();
            rng.shuffle(&mut extras);
            distractors.extend(
                extras
                    .into_iter()
                    .take(DISTRACTOR_COUNT - distractors.len())
                    .cloned(),
            );
        }
        // final padding with placeholders, cycled by question and pick count
        for _ in 0..GENERIC_OPTIONS.len() {
            if distractors.len() >= DISTRACTOR_COUNT {
                break;
            }
            let generic =
                GENERIC_OPTIONS[(questions.len() + distractors.len()) % GENERIC_OPTIONS.len()];
            if !distractors.iter().any(|picked| picked == generic) {
                distractors.push(generic.to_string());
            }
        }

        let mut options: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT + 1);
        options.push(vocabulary::capitalize_first(&target));
        options.extend(distractors.iter().map(|word| vocabulary::capitalize_first(word)));
        rng.shuffle(&mut options);

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
        seen_texts.insert(key);
    }

    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn pads_with_generic_placeholders_when_vocabulary_is_tiny() {
        // one qualifying sentence, almost no reusable vocabulary
        let text = "Quartz is hard and it is cold.";
        let mut rng = fixtures::seeded_rng();

        let questions = generate_ultra_fallback_mcqs(text, 1, &mut rng);

        assert_eq!(questions.len(), 1);
        let question = &questions[0];
        assert_eq!(question.options.len(), 4);
        assert_eq!(question.text.matches("____").count(), 1);
        assert!(
            question
                .options
                .iter()
                .any(|option| GENERIC_OPTIONS.contains(&option.as_str())),
            "placeholders should fill the distractor gap: {:?}",
            question.options
        );
        assert!(question
            .options
            .iter()
            .any(|option| option.eq_ignore_ascii_case("quartz")));
    }

    #[test]
    fn accepts_sentences_the_primary_window_rejects() {
        // 26 chars: below the heuristic minimum of 30, inside 20..260
        let text = "Falcons dive very quickly.";
        let mut rng = fixtures::seeded_rng();

        let questions = generate_ultra_fallback_mcqs(text, 1, &mut rng);
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn deduplicates_by_blanked_text() {
        let text = "Granite forms deep underground. Granite forms deep underground.";
        let mut rng = fixtures::seeded_rng();

        let questions = generate_ultra_fallback_mcqs(text, 5, &mut rng);
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let mut rng = fixtures::seeded_rng();
        assert!(generate_ultra_fallback_mcqs("", 3, &mut rng).is_empty());
        assert!(generate_ultra_fallback_mcqs(fixtures::prose_text(), 0, &mut rng).is_empty());
    }
}
