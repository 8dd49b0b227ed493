use serde::{Deserialize, Serialize};

use crate::text::TitleRules;

/// Tunable thresholds for the rubric heuristics.
///
/// Every field defaults to the calibrated rubric value, so a config file only
/// needs to list what it changes. Penalty and bonus weights are fixed; only
/// the trigger points live here.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   punctuation:
///     max_average_sentence_words: 30
///   semantics:
///     min_type_token_ratio: 0.4
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    pub punctuation: PunctuationThresholds,
    pub syntax: SyntaxThresholds,
    pub semantics: SemanticsThresholds,
    pub organization: OrganizationThresholds,
    pub cohesion: CohesionThresholds,
}

/// Sentence-length triggers for the punctuation criterion.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PunctuationThresholds {
    /// Average words per sentence above which a flat penalty applies
    pub max_average_sentence_words: f64,
    /// Sentences with at least this many words are penalised as too long
    pub long_sentence_words: usize,
    /// Sentences with more than this many words need at least one comma
    pub comma_free_sentence_words: usize,
}

impl Default for PunctuationThresholds {
    fn default() -> Self {
        Self {
            max_average_sentence_words: 28.0,
            long_sentence_words: 35,
            comma_free_sentence_words: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SyntaxThresholds {
    /// Sentences with fewer words are fragments
    pub fragment_words: usize,
    /// Sentences with at least this many words are run-ons
    pub run_on_words: usize,
    /// Share of "que" among all words above which a flat penalty applies
    pub max_que_ratio: f64,
}

impl Default for SyntaxThresholds {
    fn default() -> Self {
        Self {
            fragment_words: 3,
            run_on_words: 50,
            max_que_ratio: 0.06,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SemanticsThresholds {
    /// Type-token ratio below which vocabulary counts as repetitive
    pub min_type_token_ratio: f64,
}

impl Default for SemanticsThresholds {
    fn default() -> Self {
        Self {
            min_type_token_ratio: 0.36,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OrganizationThresholds {
    pub title_max_chars: usize,
    pub title_min_words: usize,
    pub min_paragraphs: usize,
    pub max_paragraphs: usize,
    /// Allowed gap, in tokens, between the longest and shortest paragraph
    pub max_paragraph_spread: usize,
}

impl Default for OrganizationThresholds {
    fn default() -> Self {
        Self {
            title_max_chars: 85,
            title_min_words: 3,
            min_paragraphs: 2,
            max_paragraphs: 6,
            max_paragraph_spread: 120,
        }
    }
}

impl OrganizationThresholds {
    pub fn title_rules(&self) -> TitleRules {
        TitleRules {
            max_chars: self.title_max_chars,
            min_words: self.title_min_words,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CohesionThresholds {
    /// Minimum count the top content word must exceed to be a repetition
    pub repetition_floor: usize,
    /// Share of content tokens the top content word must exceed
    pub repetition_ratio: f64,
}

impl Default for CohesionThresholds {
    fn default() -> Self {
        Self {
            repetition_floor: 3,
            repetition_ratio: 0.05,
        }
    }
}
