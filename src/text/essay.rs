use super::{split_sentences, tokenize};

/// Pre-computed surface artifacts of one essay.
///
/// Built once per grading call from the trimmed text and shared read-only by
/// every criterion.
#[derive(Debug, Clone)]
pub struct Essay<'a> {
    pub text: &'a str,
    pub lowered: String,
    pub sentences: Vec<&'a str>,
    pub tokens: Vec<String>,
}

impl<'a> Essay<'a> {
    pub fn analyze(text: &'a str) -> Self {
        let text = text.trim();
        Self {
            text,
            lowered: text.to_lowercase(),
            sentences: split_sentences(text),
            tokens: tokenize(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Sentences for length-based checks. Text without any sentence yields the
    /// whole (possibly empty) text as the single sentence.
    pub fn sentences_or_whole(&self) -> Vec<&'a str> {
        if self.sentences.is_empty() {
            vec![self.text]
        } else {
            self.sentences.clone()
        }
    }
}
