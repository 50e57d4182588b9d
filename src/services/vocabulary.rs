use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::Difficulty;

/// Marker inserted where a word was removed from a sentence.
pub const BLANK: &str = "____";

/// Words of four letters or more, allowing inner apostrophes and hyphens.
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z'-]{3,}").unwrap());

/// Capitalized tokens that look like proper nouns.
static PROPER_NOUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z][a-z]{3,}\b").unwrap());

/// Common English function words that never make useful blanks.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "for", "are", "with", "that", "this", "from", "have", "was", "were",
        "has", "had", "not", "but", "you", "your", "about", "into", "over", "than", "then",
        "they", "them", "their", "there", "here", "what", "when", "where", "which", "while",
        "will", "would", "could", "should", "can", "also", "such", "each", "more", "most",
        "some", "many", "much", "very", "just", "like", "upon", "only", "other", "these",
        "those", "between", "within", "across", "because", "before", "after", "during",
        "without", "against", "among", "under", "above", "may", "might", "another", "being",
        "been", "who", "whom", "whose", "our", "ours", "its", "it's", "his", "her", "hers",
        "him", "she", "he", "it", "we", "i",
    ]
    .into_iter()
    .collect()
});

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Lowercased tokens of the text, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Frequency-ranked words worth blanking out: stop words removed, words
/// below the difficulty's frequency threshold dropped, most frequent first
/// (ties keep first-appearance order), proper-noun-looking tokens promoted
/// to the front.
pub fn candidate_vocabulary(text: &str, difficulty: Difficulty) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    for word in tokenize(text) {
        if is_stop_word(&word) {
            continue;
        }
        match counts.get_mut(&word) {
            Some(count) => *count += 1,
            None => {
                counts.insert(word.clone(), 1);
                first_seen.push(word);
            }
        }
    }

    let threshold = difficulty.frequency_threshold();
    let mut ranked: Vec<String> = first_seen
        .into_iter()
        .filter(|word| counts[word] >= threshold)
        .collect();
    ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));

    let mut candidates: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for word in proper_nouns(text).into_iter().chain(ranked) {
        if seen.insert(word.clone()) {
            candidates.push(word);
        }
    }
    candidates
}

/// Full deduplicated non-stop vocabulary, no frequency threshold. Used by
/// the least selective fallback tier.
pub fn full_vocabulary(text: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|word| !is_stop_word(word) && seen.insert(word.clone()))
        .collect()
}

fn proper_nouns(text: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    PROPER_NOUN
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

/// First token of the sentence that belongs to the candidate vocabulary.
pub fn blank_target(sentence: &str, candidates: &HashSet<&str>) -> Option<String> {
    tokenize(sentence)
        .into_iter()
        .find(|word| candidates.contains(word.as_str()) && !is_stop_word(word))
}

/// Replaces the first whole-word, case-insensitive occurrence of `target`
/// with the blank marker. None when the word cannot be located as a whole
/// word in the sentence.
pub fn blank_out(sentence: &str, target: &str) -> Option<String> {
    let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(target))).ok()?;
    let found = pattern.find(sentence)?;

    let blanked = format!(
        "{}{}{}",
        &sentence[..found.start()],
        BLANK,
        &sentence[found.end()..]
    );
    let blanked = blanked.trim().to_string();
    blanked.contains(BLANK).then_some(blanked)
}

/// Uppercases the first letter, leaving the rest untouched.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
