use log::{debug, warn};
use regex::Regex;

/// Build a case-sensitive whole-word pattern for a literal term.
///
/// Blank terms produce no pattern. Word boundaries are Unicode-aware, so
/// accented letters count as word characters.
fn whole_word(term: &str) -> Option<Regex> {
    if term.trim().is_empty() {
        return None;
    }
    match Regex::new(&format!(r"\b{}\b", regex::escape(term))) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Skipping term '{}': {}", term, e);
            None
        }
    }
}

/// Whether `term` occurs as a whole word or phrase in `haystack`.
///
/// Compiles the pattern on every call; use a [`TermSet`] for lists that are
/// matched against many essays.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    whole_word(term).is_some_and(|re| re.is_match(haystack))
}

/// A word list compiled once into whole-word patterns, one per term.
///
/// Blank terms are dropped at compile time and never match. Duplicates are
/// kept, so a term listed twice counts twice.
#[derive(Debug, Clone, Default)]
pub struct TermSet {
    patterns: Vec<Regex>,
}

impl TermSet {
    pub fn compile<S: AsRef<str>>(terms: &[S]) -> Self {
        let patterns: Vec<Regex> = terms
            .iter()
            .filter_map(|t| whole_word(t.as_ref()))
            .collect();
        debug!("Compiled {} of {} terms", patterns.len(), terms.len());
        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of terms present at least once.
    pub fn count_present(&self, haystack: &str) -> usize {
        self.patterns.iter().filter(|re| re.is_match(haystack)).count()
    }

    /// Non-overlapping occurrences of every term, summed.
    pub fn count_occurrences(&self, haystack: &str) -> usize {
        self.count_occurrences_capped(haystack, usize::MAX)
    }

    /// Like [`count_occurrences`](Self::count_occurrences), but each term
    /// contributes at most `cap`.
    pub fn count_occurrences_capped(&self, haystack: &str, cap: usize) -> usize {
        self.patterns
            .iter()
            .map(|re| re.find_iter(haystack).count().min(cap))
            .sum()
    }
}
