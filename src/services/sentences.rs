use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Length bounds a sentence must fall strictly inside, in characters.
/// Callers tune these per pass: tighter windows for the primary generators,
/// wider ones for the fallback tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SentenceWindow {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl SentenceWindow {
    pub const fn new(min_chars: usize, max_chars: usize) -> Self {
        SentenceWindow {
            min_chars,
            max_chars,
        }
    }

    pub fn contains(&self, sentence: &str) -> bool {
        let len = sentence.chars().count();
        len > self.min_chars && len < self.max_chars
    }
}

/// Collapses whitespace runs (including page-boundary newlines) to single
/// spaces.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUNS.replace_all(text, " ").into_owned()
}

/// Splits text into sentences at `.`, `!` or `?` followed by whitespace.
/// The punctuation stays attached to the preceding sentence. Pieces are
/// trimmed and filtered through `window`; everything is recomputed from the
/// text on each call.
pub fn split_sentences(text: &str, window: SentenceWindow) -> Vec<String> {
    let normalized = normalize_whitespace(text);
    let bytes = normalized.as_bytes();

    let mut pieces: Vec<&str> = Vec::new();
    let mut start = 0;
    for i in 0..bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') && bytes.get(i + 1) == Some(&b' ') {
            pieces.push(&normalized[start..=i]);
            start = i + 2;
        }
    }
    if start < normalized.len() {
        pieces.push(&normalized[start..]);
    }

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty() && window.contains(piece))
        .map(str::to_string)
        .collect()
}
