use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::{AnswerLetter, Question};
use crate::services::sentences::normalize_whitespace;

/// Start of a numbered question block: "1)", "12.", "3:", "4-" style markers.
static BLOCK_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+[).:\-]").unwrap());

/// The same marker anchored to the head of a block, trailing whitespace
/// included.
static BLOCK_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[).:\-]\s*").unwrap());

/// Where a question stem ends: a newline, or the first lettered option
/// marker. Only A-D are recognized; a known format restriction.
static STEM_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n|^[A-D][).:\-]|\s[A-D][).:\-]").unwrap());

/// A lettered option marker at a whitespace boundary.
static OPTION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)([A-D])[).:\-]\s*").unwrap());

/// Marker that terminates the option list ("Answer:" line or inline tag).
static ANSWER_CUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:^|\s)Answer\s*:").unwrap());

/// The answer letter itself, read leniently.
static ANSWER_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Answer[:\s]*([A-D])").unwrap());

/// Recovers MCQs from text that is already quiz-formatted: numbered items,
/// lettered options, an optional "Answer: X" tag. Blocks without a stem or
/// with fewer than two options are dropped silently; a low yield is the
/// caller's signal to escalate to heuristic generation. Deterministic:
/// parsing the same text twice gives identical results.
pub fn parse_structured_questions(text: &str) -> Vec<Question> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let starts: Vec<usize> = BLOCK_MARKER.find_iter(text).map(|m| m.start()).collect();
    let mut questions = Vec::new();
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        if let Some(question) = parse_block(text[start..end].trim()) {
            questions.push(question);
        }
    }

    log::debug!("structured parser recovered {} questions", questions.len());
    questions
}

fn parse_block(block: &str) -> Option<Question> {
    let head = BLOCK_HEAD.find(block)?;
    let body = &block[head.end()..];

    let stem_end = STEM_END.find(body).map(|m| m.start()).unwrap_or(body.len());
    let stem = normalize_whitespace(&body[..stem_end]).trim().to_string();
    if stem.is_empty() {
        return None;
    }

    let answer_start = ANSWER_CUT
        .find(block)
        .map(|m| m.start())
        .unwrap_or(block.len());

    // (marker start, option text start) for each lettered marker before the
    // answer tag
    let markers: Vec<(usize, usize)> = OPTION_MARKER
        .captures_iter(block)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            (whole.start() < answer_start).then_some((whole.start(), whole.end()))
        })
        .collect();

    let mut options: Vec<String> = Vec::new();
    for (i, &(_, text_start)) in markers.iter().enumerate() {
        let text_end = markers
            .get(i + 1)
            .map(|&(next_start, _)| next_start)
            .unwrap_or(answer_start);
        if text_end <= text_start {
            continue;
        }
        let option = normalize_whitespace(&block[text_start..text_end])
            .trim()
            .to_string();
        if !option.is_empty() && !options.contains(&option) {
            options.push(option);
        }
    }
    if options.len() < 2 {
        return None;
    }

    let answer = ANSWER_TAG
        .captures(block)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .and_then(AnswerLetter::from_char)
        // an answer tag pointing outside the parsed options is unusable
        .filter(|letter| letter.index() < options.len());

    Some(Question::multiple_choice(stem, options, answer))
}
