//! The ten rubric criteria.
//!
//! Each criterion is a pure function of the pre-computed [`Essay`] artifacts
//! plus the lexicon and thresholds it reads. Criteria never see each other's
//! values; each clamps itself to `[0, max]`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use super::config::Thresholds;
use super::lexicon::CompiledLexicon;
use crate::text::{self, contains_term, Essay};

static LAUGHTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bkkk+\b").unwrap());

/// Standalone 2 to 4 digit numbers: years, percentages, statistics.
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{2,4}\b").unwrap());

const INFORMAL_PENALTY: f64 = 2.0;
const ORTHOGRAPHY_PENALTY: f64 = 1.5;
const ORTHOGRAPHY_MAX_OCCURRENCES: usize = 3;

/// Score given to a non-empty essay written as a single paragraph.
pub const SINGLE_PARAGRAPH_SCORE: f64 = 5.0;

/// A named rubric line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Orthography,
    Punctuation,
    Syntax,
    Semantics,
    Typology,
    Organization,
    Development,
    Content,
    Cohesion,
    Authorship,
}

impl Criterion {
    pub const EXPRESSION: [Criterion; 5] = [
        Criterion::Orthography,
        Criterion::Punctuation,
        Criterion::Syntax,
        Criterion::Semantics,
        Criterion::Typology,
    ];

    pub const STRUCTURE: [Criterion; 5] = [
        Criterion::Organization,
        Criterion::Development,
        Criterion::Content,
        Criterion::Cohesion,
        Criterion::Authorship,
    ];

    /// Rubric label as printed on the grading sheet.
    pub fn label(self) -> &'static str {
        match self {
            Criterion::Orthography => "Convenções ortográficas",
            Criterion::Punctuation => "Pontuação",
            Criterion::Syntax => "Sintaxe e morfossintaxe",
            Criterion::Semantics => "Semântica (escolha vocabular)",
            Criterion::Typology => "Domínio da tipologia (argumentação)",
            Criterion::Organization => "Organização do texto (título, parágrafos)",
            Criterion::Development => "Desenvolvimento do tema e ponto de vista",
            Criterion::Content => "Qualidade de conteúdo (repertório, exemplos)",
            Criterion::Cohesion => "Coesão textual",
            Criterion::Authorship => "Investimento autoral",
        }
    }

    pub fn max(self) -> f64 {
        match self {
            Criterion::Orthography => 10.0,
            Criterion::Punctuation => 8.0,
            Criterion::Syntax => 12.0,
            Criterion::Semantics => 10.0,
            Criterion::Typology => 10.0,
            Criterion::Organization => 10.0,
            Criterion::Development => 12.0,
            Criterion::Content => 10.0,
            Criterion::Cohesion => 8.0,
            Criterion::Authorship => 10.0,
        }
    }
}

/// Orthographic conventions: known misspellings and informal writing.
pub fn orthography(essay: &Essay, lexicon: &CompiledLexicon) -> f64 {
    let lowered = &essay.lowered;
    let misspelled = lexicon
        .misspellings
        .count_occurrences_capped(lowered, ORTHOGRAPHY_MAX_OCCURRENCES);
    let mut penalty = misspelled as f64 * ORTHOGRAPHY_PENALTY;

    if lowered.contains(" vc ") || lowered.contains(" q ") {
        penalty += INFORMAL_PENALTY;
    }
    if LAUGHTER.is_match(lowered) {
        penalty += INFORMAL_PENALTY;
    }

    (Criterion::Orthography.max() - penalty).max(0.0)
}

/// Punctuation: long sentences and long sentences without commas.
pub fn punctuation(essay: &Essay, thresholds: &Thresholds) -> f64 {
    let t = &thresholds.punctuation;
    let sentences = essay.sentences_or_whole();
    let lengths: Vec<usize> = sentences.iter().map(|s| text::word_count(s)).collect();

    let average = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    let long = lengths
        .iter()
        .filter(|&&n| n >= t.long_sentence_words)
        .count();
    let comma_free = sentences
        .iter()
        .zip(&lengths)
        .filter(|(s, n)| !s.contains(',') && **n > t.comma_free_sentence_words)
        .count();

    let mut penalty = long as f64 * 1.5 + comma_free as f64;
    if average > t.max_average_sentence_words {
        penalty += 2.0;
    }

    (Criterion::Punctuation.max() - penalty).max(0.0)
}

/// Syntax: fragments, run-on sentences and overuse of "que".
pub fn syntax(essay: &Essay, thresholds: &Thresholds) -> f64 {
    let t = &thresholds.syntax;
    let sentences = essay.sentences_or_whole();

    let mut fragments = 0;
    let mut run_ons = 0;
    let mut words = 0;
    let mut que = 0;
    for sentence in &sentences {
        let n = text::word_count(sentence);
        if n < t.fragment_words {
            fragments += 1;
        }
        if n >= t.run_on_words {
            run_ons += 1;
        }
        words += n;
        que += sentence
            .to_lowercase()
            .split_whitespace()
            .filter(|w| *w == "que")
            .count();
    }

    let que_ratio = que as f64 / words.max(1) as f64;
    let mut penalty = fragments as f64 * 1.5 + run_ons as f64 * 2.0;
    if que_ratio > t.max_que_ratio {
        penalty += 3.0;
    }

    (Criterion::Syntax.max() - penalty).max(0.0)
}

/// Vocabulary choice: lexical diversity and vague filler words.
pub fn semantics(essay: &Essay, lexicon: &CompiledLexicon, thresholds: &Thresholds) -> f64 {
    let mut penalty = 0.0;
    if text::type_token_ratio(&essay.tokens) < thresholds.semantics.min_type_token_ratio {
        penalty += 2.0;
    }

    let fillers = lexicon
        .filler_words
        .iter()
        .filter(|f| essay.tokens.iter().any(|t| t == *f))
        .count();
    penalty += fillers as f64 * 0.5;

    (Criterion::Semantics.max() - penalty).max(0.0)
}

/// Argumentative typology: explicit thesis markers and connective usage.
pub fn typology(essay: &Essay, lexicon: &CompiledLexicon) -> f64 {
    let thesis_hits = lexicon.thesis_markers.count_present(&essay.lowered);
    let connective_hits = lexicon.connectives.count_present(&essay.lowered);

    let score = 5.0 + thesis_hits.min(3) as f64 * 1.5 + connective_hits.min(6) as f64 * 0.5;
    score.min(Criterion::Typology.max())
}

/// Text organization: title, paragraph count and paragraph balance.
pub fn organization(essay: &Essay, thresholds: &Thresholds) -> f64 {
    let t = &thresholds.organization;
    let title = text::detect_title(essay.text, t.title_rules());
    let source = if title.is_title { title.body } else { essay.text };
    let paragraphs = text::split_paragraphs(source);

    if paragraphs.len() <= 1 && !essay.is_empty() {
        return SINGLE_PARAGRAPH_SCORE;
    }

    let lengths: Vec<usize> = paragraphs.iter().map(|p| text::tokenize(p).len()).collect();
    let spread = match (lengths.iter().max(), lengths.iter().min()) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    };

    let mut score = Criterion::Organization.max();
    if !title.is_title {
        score -= 2.0;
    }
    if paragraphs.len() < t.min_paragraphs {
        score -= 3.0;
    }
    if paragraphs.len() > t.max_paragraphs {
        score -= 1.5;
    }
    if spread > t.max_paragraph_spread {
        score -= 1.5;
    }

    score.max(0.0)
}

/// Fraction of theme keywords found as whole words; 0 with no keywords.
pub fn keyword_coverage<S: AsRef<str>>(essay: &Essay, keywords: &[S]) -> f64 {
    if keywords.is_empty() {
        return 0.0;
    }
    let hits = keywords
        .iter()
        .filter(|k| contains_term(&essay.lowered, &k.as_ref().to_lowercase()))
        .count();
    hits as f64 / keywords.len() as f64
}

/// Theme development: keyword coverage and an announced point of view.
pub fn development<S: AsRef<str>>(
    essay: &Essay,
    lexicon: &CompiledLexicon,
    keywords: &[S],
) -> f64 {
    let coverage = keyword_coverage(essay, keywords);
    let has_point_of_view = lexicon.point_of_view_markers.count_present(&essay.lowered) > 0;

    let mut score = 5.0 + coverage * 5.0;
    if has_point_of_view {
        score += 2.0;
    }
    score.min(Criterion::Development.max())
}

/// Content quality: cited sources, examples and figures.
pub fn content(essay: &Essay, lexicon: &CompiledLexicon) -> f64 {
    let example_hits = lexicon.example_markers.count_present(&essay.lowered);
    let numbers = NUMBER.find_iter(essay.text).count();

    let score = 4.0 + example_hits.min(5) as f64 + numbers.min(3) as f64 * 0.8;
    score.min(Criterion::Content.max())
}

/// Textual cohesion: connectives, minus a penalty for hammering one word.
pub fn cohesion(essay: &Essay, lexicon: &CompiledLexicon, thresholds: &Thresholds) -> f64 {
    let t = &thresholds.cohesion;
    let connective_hits = lexicon.connectives.count_present(&essay.lowered);

    let content_words: Vec<&str> = essay
        .tokens
        .iter()
        .map(String::as_str)
        .filter(|tok| !lexicon.is_stopword(tok))
        .collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in &content_words {
        *counts.entry(*word).or_insert(0) += 1;
    }
    let top = counts.values().copied().max().unwrap_or(0);

    let limit = (t.repetition_floor as f64).max(content_words.len() as f64 * t.repetition_ratio);
    let penalty = if top as f64 > limit { 1.5 } else { 0.0 };

    (3.0 + connective_hits.min(8) as f64 * 0.6 - penalty).clamp(0.0, Criterion::Cohesion.max())
}

/// Authorial investment: first-person stance and rhetorical questions.
pub fn authorship(essay: &Essay, lexicon: &CompiledLexicon) -> f64 {
    let first_person = lexicon.first_person_markers.count_occurrences(&essay.lowered);

    let mut score = 6.0 + first_person.min(3) as f64 * 1.2;
    if essay.text.contains('?') {
        score += 0.8;
    }
    score.min(Criterion::Authorship.max())
}
