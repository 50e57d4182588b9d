use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::{AnswerLetter, Difficulty, Question};
use crate::random::RandomSource;
use crate::services::sentences::{split_sentences, SentenceWindow};

/// Sentence bounds for the primary pass.
const SENTENCE_WINDOW: SentenceWindow = SentenceWindow::new(30, 200);

/// Wider bounds for the relaxed fallback pass.
const RELAXED_WINDOW: SentenceWindow = SentenceWindow::new(12, 320);

/// Fixed false-probability of the fallback pass.
const FALLBACK_FALSE_PROBABILITY: f64 = 0.60;

/// Auxiliary and modal verbs negatable by inserting "not" after them, tried
/// in this order.
const AUX_VERBS: [&str; 8] = [
    "is", "are", "was", "were", "can", "should", "could", "will",
];

static AUX_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    AUX_VERBS
        .iter()
        .map(|verb| Regex::new(&format!(r"(?i)\b{}\s", verb)).unwrap())
        .collect()
});

static AUX_COMBINED: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\b(?:{})\s", AUX_VERBS.join("|"))).unwrap());

static SMALL_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,3}\b").unwrap());

/// Turns sentences into true/false statements, negating a share of them
/// according to the difficulty's false-probability. Negation inserts "not"
/// after the first auxiliary verb not already negated, or failing that bumps
/// the first small number by one.
///
/// When both transformations fail the statement is still emitted with answer
/// B even though its text is unchanged, so a true statement can be keyed
/// false. Known correctness gap; the relaxed fallback pass below only keys
/// a statement false after a real transformation. See DESIGN.md.
pub fn generate_true_false(
    text: &str,
    desired: usize,
    difficulty: Difficulty,
    rng: &mut RandomSource,
) -> Vec<Question> {
    if text.trim().is_empty() || desired == 0 {
        return Vec::new();
    }

    let sentences = split_sentences(text, SENTENCE_WINDOW);
    let mut questions = Vec::new();
    for sentence in sentences {
        if questions.len() >= desired {
            break;
        }

        if !rng.chance(difficulty.false_probability()) {
            questions.push(Question::true_false(sentence, AnswerLetter::A));
            continue;
        }

        let statement = negate_with_verbs(&sentence)
            .or_else(|| bump_first_number(&sentence))
            .unwrap_or(sentence);
        questions.push(Question::true_false(statement, AnswerLetter::B));
    }
    questions
}

/// Relaxed pass used only to fill a shortfall: wider sentence window, one
/// combined negation pattern, and a statement is only keyed false when the
/// negation actually changed its text. `seen` holds lowercase statements
/// already emitted and is updated as sentences are consumed.
pub fn generate_true_false_fallback(
    text: &str,
    desired: usize,
    rng: &mut RandomSource,
    seen: &mut HashSet<String>,
) -> Vec<Question> {
    if text.trim().is_empty() || desired == 0 {
        return Vec::new();
    }

    let sentences = split_sentences(text, RELAXED_WINDOW);
    let mut questions = Vec::new();
    for sentence in sentences {
        if questions.len() >= desired {
            break;
        }
        if !seen.insert(sentence.to_lowercase()) {
            continue;
        }

        let mut statement = sentence;
        let mut answer = AnswerLetter::A;
        if rng.chance(FALLBACK_FALSE_PROBABILITY) {
            if let Some(negated) = insert_not(&statement, &AUX_COMBINED) {
                statement = negated;
                answer = AnswerLetter::B;
            }
        }
        questions.push(Question::true_false(statement, answer));
    }
    questions
}

/// Primary pass topped up by the relaxed fallback, truncated to exactly
/// `desired`. The fallback's dedup set is seeded with the primary output so
/// the wrapper never emits the same statement twice.
pub fn generate_true_false_flexible(
    text: &str,
    desired: usize,
    difficulty: Difficulty,
    rng: &mut RandomSource,
) -> Vec<Question> {
    if desired == 0 {
        return Vec::new();
    }

    let mut questions = generate_true_false(text, desired, difficulty, rng);
    if questions.len() < desired {
        let mut seen: HashSet<String> =
            questions.iter().map(|question| question.dedup_key()).collect();
        let need = desired - questions.len();
        let fill = generate_true_false_fallback(text, need, rng, &mut seen);
        log::debug!("true/false fallback filled {} of {} missing", fill.len(), need);
        questions.extend(fill);
    }
    questions.truncate(desired);
    questions
}

/// Tries each auxiliary-verb pattern in order; first match wins.
fn negate_with_verbs(statement: &str) -> Option<String> {
    AUX_PATTERNS
        .iter()
        .find_map(|pattern| insert_not(statement, pattern))
}

/// Inserts "not" after the first occurrence matched by `pattern` that is
/// not already followed by "not".
fn insert_not(statement: &str, pattern: &Regex) -> Option<String> {
    for found in pattern.find_iter(statement) {
        let rest = &statement[found.end()..];
        if already_not(rest) {
            continue;
        }
        let mut negated = String::with_capacity(statement.len() + 4);
        negated.push_str(&statement[..found.end()]);
        negated.push_str("not ");
        negated.push_str(rest);
        return Some(negated);
    }
    None
}

fn already_not(rest: &str) -> bool {
    let head: String = rest.chars().take(4).collect::<String>().to_lowercase();
    if !head.starts_with("not") {
        return false;
    }
    match head.chars().nth(3) {
        None => true,
        Some(c) => !(c.is_ascii_alphanumeric() || c == '_'),
    }
}

/// Bumps the first bare one-to-three digit number by one.
fn bump_first_number(statement: &str) -> Option<String> {
    let found = SMALL_NUMBER.find(statement)?;
    let value: u32 = found.as_str().parse().ok()?;
    Some(format!(
        "{}{}{}",
        &statement[..found.start()],
        value + 1,
        &statement[found.end()..]
    ))
}
