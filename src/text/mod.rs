//! Surface text analysis: sentences, tokens, paragraphs and title detection.
//!
//! Everything here is a total function over `&str`. Empty input yields empty
//! sequences and zero counts, never an error.

pub mod essay;
pub mod matching;

pub use essay::Essay;
pub use matching::{contains_term, TermSet};

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Sentence-final punctuation followed by a whitespace run.
static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.?!]\s+").unwrap());

/// Latin letters including the Latin-1 accented range, hyphen and apostrophe.
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-zÀ-ÿ\-']+").unwrap());

/// A blank line: two newlines with only whitespace between them.
static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Split text into trimmed, non-empty sentences.
///
/// A sentence ends at `.`, `?` or `!` when followed by whitespace. Text with
/// no such boundary is a single sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        // The punctuation mark is ASCII, so the sentence ends one byte in.
        let end = m.start() + 1;
        push_trimmed(&mut sentences, &text[start..end]);
        start = m.end();
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece);
    }
}

/// Lowercase the text and extract its word tokens.
///
/// Digits and punctuation never form tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Whitespace-separated word count, the unit used for sentence lengths.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Distinct tokens divided by total tokens; 0 for an empty sequence.
pub fn type_token_ratio(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    distinct.len() as f64 / tokens.len() as f64
}

/// Non-empty blocks separated by blank lines, in order.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .collect()
}

/// Number of paragraphs: 0 for blank text, otherwise at least 1.
pub fn count_paragraphs(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }
    split_paragraphs(trimmed).len().max(1)
}

/// Outcome of title detection on an essay.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleSplit<'a> {
    pub is_title: bool,
    pub title: &'a str,
    /// Text after the title, trimmed; the whole input when no title was found.
    pub body: &'a str,
}

/// Title rules: the first non-blank line must be short, not end with a
/// period, hold a few words and open with an uppercase letter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleRules {
    pub max_chars: usize,
    pub min_words: usize,
}

impl Default for TitleRules {
    fn default() -> Self {
        Self {
            max_chars: 85,
            min_words: 3,
        }
    }
}

/// Detect a title on the first non-blank line with the default rules.
pub fn has_title(text: &str) -> TitleSplit<'_> {
    detect_title(text, TitleRules::default())
}

pub fn detect_title(text: &str, rules: TitleRules) -> TitleSplit<'_> {
    let no_title = TitleSplit {
        is_title: false,
        title: "",
        body: text,
    };

    let Some(first) = text.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return no_title;
    };

    let starts_upper = first.chars().next().is_some_and(char::is_uppercase);
    let is_title = first.chars().count() <= rules.max_chars
        && !first.ends_with('.')
        && word_count(first) >= rules.min_words
        && starts_upper;

    if !is_title {
        return no_title;
    }

    let body = match text.find(first) {
        Some(pos) => text[pos + first.len()..].trim(),
        None => text,
    };

    TitleSplit {
        is_title: true,
        title: first,
        body,
    }
}
