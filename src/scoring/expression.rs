use log::debug;

use super::criteria::{self, Criterion};
use super::engine::{Breakdown, Rubric};
use crate::text::Essay;

/// Score the mechanics of language: orthography, punctuation, syntax,
/// vocabulary and mastery of the argumentative form.
///
/// Returns the unrounded sum of the five criteria and their breakdown.
pub fn score_expression(essay: &Essay, rubric: &Rubric) -> (f64, Breakdown) {
    let thresholds = rubric.thresholds();
    let lexicon = rubric.compiled();

    let scores = [
        (Criterion::Orthography, criteria::orthography(essay, lexicon)),
        (Criterion::Punctuation, criteria::punctuation(essay, thresholds)),
        (Criterion::Syntax, criteria::syntax(essay, thresholds)),
        (Criterion::Semantics, criteria::semantics(essay, lexicon, thresholds)),
        (Criterion::Typology, criteria::typology(essay, lexicon)),
    ];

    let mut total = 0.0;
    let mut breakdown = Breakdown::default();
    for (criterion, value) in scores {
        debug!("{}: {:.2}/{}", criterion.label(), value, criterion.max());
        total += value;
        breakdown.push(criterion, value);
    }

    (total, breakdown)
}
