use log::debug;

use super::criteria::{self, Criterion};
use super::engine::{Breakdown, Rubric};
use crate::text::Essay;

/// Score argumentative substance: organization, theme development,
/// repertoire, cohesion and authorial voice.
///
/// Returns the unrounded sum of the five criteria and their breakdown.
pub fn score_structure_content<S: AsRef<str>>(
    essay: &Essay,
    theme_keywords: &[S],
    rubric: &Rubric,
) -> (f64, Breakdown) {
    let thresholds = rubric.thresholds();
    let lexicon = rubric.compiled();

    let scores = [
        (Criterion::Organization, criteria::organization(essay, thresholds)),
        (
            Criterion::Development,
            criteria::development(essay, lexicon, theme_keywords),
        ),
        (Criterion::Content, criteria::content(essay, lexicon)),
        (Criterion::Cohesion, criteria::cohesion(essay, lexicon, thresholds)),
        (Criterion::Authorship, criteria::authorship(essay, lexicon)),
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
