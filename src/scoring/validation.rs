use super::config::Thresholds;
use super::engine::Rubric;
use super::lexicon::Lexicon;

/// Validate a rubric at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_rubric(rubric: &Rubric) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    check_thresholds(rubric.thresholds(), &mut errors);
    check_lexicon(rubric.lexicon(), &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_ratio(path: &str, value: f64, errors: &mut Vec<String>) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(format!("{}: must be between 0 and 1, got {}", path, value));
    }
}

fn check_thresholds(t: &Thresholds, errors: &mut Vec<String>) {
    let p = &t.punctuation;
    if !p.max_average_sentence_words.is_finite() || p.max_average_sentence_words <= 0.0 {
        errors.push("scoring.punctuation.max_average_sentence_words: must be positive".to_string());
    }
    if p.long_sentence_words == 0 {
        errors.push("scoring.punctuation.long_sentence_words: must be positive".to_string());
    }

    let s = &t.syntax;
    if s.run_on_words <= s.fragment_words {
        errors.push(format!(
            "scoring.syntax.run_on_words: must exceed fragment_words ({})",
            s.fragment_words
        ));
    }
    check_ratio("scoring.syntax.max_que_ratio", s.max_que_ratio, errors);

    check_ratio(
        "scoring.semantics.min_type_token_ratio",
        t.semantics.min_type_token_ratio,
        errors,
    );

    let o = &t.organization;
    if o.title_max_chars == 0 {
        errors.push("scoring.organization.title_max_chars: must be positive".to_string());
    }
    if o.min_paragraphs > o.max_paragraphs {
        errors.push(format!(
            "scoring.organization.min_paragraphs: {} exceeds max_paragraphs ({})",
            o.min_paragraphs, o.max_paragraphs
        ));
    }

    check_ratio(
        "scoring.cohesion.repetition_ratio",
        t.cohesion.repetition_ratio,
        errors,
    );
}

fn check_terms<'a>(
    path: &str,
    terms: impl IntoIterator<Item = &'a String>,
    errors: &mut Vec<String>,
) {
    for (i, term) in terms.into_iter().enumerate() {
        if term.trim().is_empty() {
            errors.push(format!("{}[{}]: must not be blank", path, i));
        } else if *term != term.to_lowercase() {
            errors.push(format!("{}[{}]: '{}' must be lowercase", path, i, term));
        }
    }
}

fn check_lexicon(lexicon: &Lexicon, errors: &mut Vec<String>) {
    check_terms("lexicon.connectives", &lexicon.connectives, errors);
    check_terms("lexicon.thesis_markers", &lexicon.thesis_markers, errors);
    check_terms("lexicon.example_markers", &lexicon.example_markers, errors);
    check_terms(
        "lexicon.orthography",
        lexicon.orthography.iter().map(|p| &p.wrong),
        errors,
    );
    check_terms("lexicon.filler_words", &lexicon.filler_words, errors);
    check_terms(
        "lexicon.point_of_view_markers",
        &lexicon.point_of_view_markers,
        errors,
    );
    check_terms(
        "lexicon.first_person_markers",
        &lexicon.first_person_markers,
        errors,
    );
    check_terms("lexicon.stopwords", &lexicon.stopwords, errors);
}
