use log::debug;
use once_cell::sync::Lazy;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::config::Thresholds;
use super::criteria::Criterion;
use super::expression::score_expression;
use super::lexicon::{CompiledLexicon, Lexicon};
use super::structure::score_structure_content;
use crate::text::{count_paragraphs, Essay};

/// Built-in rubric, compiled on first use.
static DEFAULT_RUBRIC: Lazy<Rubric> = Lazy::new(Rubric::default);

/// One rubric line in a result, value rounded to two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionScore {
    pub criterion: Criterion,
    pub label: &'static str,
    pub value: f64,
    pub max: f64,
}

/// Per-criterion scores of one scorer, in rubric order.
///
/// Serializes as a map from rubric label to value, keeping rubric order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breakdown {
    criteria: Vec<CriterionScore>,
}

impl Breakdown {
    pub fn push(&mut self, criterion: Criterion, value: f64) {
        self.criteria.push(CriterionScore {
            criterion,
            label: criterion.label(),
            value: round2(value),
            max: criterion.max(),
        });
    }

    pub fn get(&self, criterion: Criterion) -> Option<f64> {
        self.criteria
            .iter()
            .find(|c| c.criterion == criterion)
            .map(|c| c.value)
    }

    pub fn get_by_label(&self, label: &str) -> Option<f64> {
        self.criteria
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CriterionScore> {
        self.criteria.iter()
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.criteria.len()))?;
        for score in &self.criteria {
            map.serialize_entry(score.label, &score.value)?;
        }
        map.end()
    }
}

/// Final grade of one essay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradingResult {
    /// Expression total, 0 to 50
    pub expression_total: f64,
    /// Structure and content total, 0 to 50
    pub structure_content_total: f64,
    /// Sum of both totals, 0 to 100
    pub total_100: f64,
    /// Total rescaled to the 0 to 25 exam scale
    pub total_25: f64,
    pub expression_detail: Breakdown,
    pub structure_detail: Breakdown,
}

/// Lexicon and thresholds a grading run reads.
///
/// The lexicon is compiled when the rubric is built, so one rubric can
/// grade any number of essays without recompiling its patterns.
#[derive(Debug, Clone)]
pub struct Rubric {
    thresholds: Thresholds,
    lexicon: Lexicon,
    compiled: CompiledLexicon,
}

impl Rubric {
    pub fn new(thresholds: Thresholds, lexicon: Lexicon) -> Self {
        let compiled = lexicon.compile();
        Self {
            thresholds,
            lexicon,
            compiled,
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn compiled(&self) -> &CompiledLexicon {
        &self.compiled
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self::new(Thresholds::default(), Lexicon::default())
    }
}

/// Grade an essay with the built-in lexicon and thresholds.
pub fn grade<S: AsRef<str>>(text: &str, theme_keywords: &[S]) -> GradingResult {
    grade_with(text, theme_keywords, &DEFAULT_RUBRIC)
}

/// Grade an essay against a given rubric.
///
/// Never fails: empty text or an empty keyword list produce low but
/// deterministic scores.
pub fn grade_with<S: AsRef<str>>(
    text: &str,
    theme_keywords: &[S],
    rubric: &Rubric,
) -> GradingResult {
    let essay = Essay::analyze(text);
    debug!(
        "Analyzed essay: {} sentences, {} tokens, {} paragraphs, {} keywords",
        essay.sentences.len(),
        essay.tokens.len(),
        count_paragraphs(essay.text),
        theme_keywords.len()
    );

    let (expression, expression_detail) = score_expression(&essay, rubric);
    let (structure, structure_detail) = score_structure_content(&essay, theme_keywords, rubric);

    let total_100 = expression + structure;
    let total_25 = scale_to_25(total_100);

    GradingResult {
        expression_total: round2(expression),
        structure_content_total: round2(structure),
        total_100: round2(total_100),
        total_25,
        expression_detail,
        structure_detail,
    }
}

/// Rescale a 0 to 100 total to the 0 to 25 exam scale, two decimals.
pub fn scale_to_25(total_100: f64) -> f64 {
    round2(total_100 / 100.0 * 25.0)
}

/// Round to two decimals from the exact decimal value of `value`.
///
/// Scaling by 100 first can turn a value stored just below a tie into an
/// exact tie: 68.3 / 4 is stored as 17.07499... and must give 17.07.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "A inclusão digital é um tema importante. Portanto, é preciso investir \
                          em educação e reduzir a desigualdade.";

    fn corpus() -> Vec<&'static str> {
        vec![
            "",
            "   ",
            "texto",
            SAMPLE,
            "Eu acho q vc sabe kkk. Coisa legal tipo muito bem aí.",
            "A Era da Informação Digital\n\n\
             Em 2019, segundo o IBGE, 40 por cento dos lares não tinham acesso à internet. \
             Nesse contexto, defendo que a inclusão digital é necessária.\n\n\
             Por outro lado, a desigualdade persiste. Além disso, faltam políticas públicas, \
             e o Estado, por conseguinte, deve agir.\n\n\
             Em suma, acredito que é preciso investir em educação. Não seria esse o caminho?",
            "seculo seculo seculo seculo seculo seculo seculo seculo seculo seculo",
            "Um.\n\nDois.\n\nTrês.\n\nQuatro.\n\nCinco.\n\nSeis.\n\nSete.\n\nOito.",
        ]
    }

    fn keywords() -> Vec<&'static str> {
        vec!["inclusão digital", "educação", "desigualdade"]
    }

    #[test]
    fn test_sample_keyword_coverage_and_thesis() {
        let result = grade(SAMPLE, &keywords());
        // full coverage: 5 + 1.0 * 5, no point-of-view marker
        assert_eq!(result.structure_detail.get(Criterion::Development), Some(10.0));
        // thesis markers "portanto" and "é preciso" lift typology above its base
        let typology = result.expression_detail.get(Criterion::Typology).unwrap();
        assert!(typology > 5.0);
    }

    #[test]
    fn test_sample_exact_scores() {
        let result = grade(SAMPLE, &keywords());
        let e = &result.expression_detail;
        // "A inclusão" reads as the missing crase in "à inclusão"
        assert_eq!(e.get(Criterion::Orthography), Some(8.5));
        assert_eq!(e.get(Criterion::Punctuation), Some(8.0));
        assert_eq!(e.get(Criterion::Syntax), Some(12.0));
        assert_eq!(e.get(Criterion::Semantics), Some(10.0));
        // thesis: é preciso, portanto = 2 (3.0); connectives: portanto = 1 (0.5)
        assert_eq!(e.get(Criterion::Typology), Some(8.5));
        assert_eq!(result.expression_total, 47.0);

        let s = &result.structure_detail;
        assert_eq!(s.get(Criterion::Organization), Some(5.0));
        assert_eq!(s.get(Criterion::Content), Some(4.0));
        assert_eq!(s.get(Criterion::Cohesion), Some(3.6));
        assert_eq!(s.get(Criterion::Authorship), Some(6.0));
        assert_eq!(result.structure_content_total, 28.6);

        assert_eq!(result.total_100, 75.6);
        assert_eq!(result.total_25, 18.9);
    }

    #[test]
    fn test_every_criterion_within_bounds() {
        for text in corpus() {
            let result = grade(text, &keywords());
            for score in result
                .expression_detail
                .iter()
                .chain(result.structure_detail.iter())
            {
                assert!(
                    score.value >= 0.0 && score.value <= score.max,
                    "{} out of bounds for {:?}: {}",
                    score.label,
                    text,
                    score.value
                );
            }
            assert!(result.expression_total >= 0.0 && result.expression_total <= 50.0);
            assert!(
                result.structure_content_total >= 0.0 && result.structure_content_total <= 50.0
            );
        }
    }

    #[test]
    fn test_totals_are_consistent() {
        for text in corpus() {
            let result = grade(text, &keywords());
            let sum = result.expression_total + result.structure_content_total;
            assert!((result.total_100 - sum).abs() <= 0.01 + 1e-9);
            assert!((result.total_25 - result.total_100 / 4.0).abs() <= 0.01 + 1e-9);
            assert!(result.total_25 >= 0.0 && result.total_25 <= 25.0);
        }
    }

    #[test]
    fn test_grade_is_deterministic() {
        for text in corpus() {
            assert_eq!(grade(text, &keywords()), grade(text, &keywords()));
        }
    }

    #[test]
    fn test_empty_input() {
        let result = grade::<&str>("", &[]);
        assert!(result.expression_total >= 0.0);
        assert!(result.structure_content_total >= 0.0);
        assert_eq!(result.expression_detail.get(Criterion::Orthography), Some(10.0));
        // empty text goes through the paragraph-count path: 10 - 2 - 3
        assert_eq!(result.structure_detail.get(Criterion::Organization), Some(5.0));
        assert_eq!(result.structure_detail.get(Criterion::Development), Some(5.0));
    }

    #[test]
    fn test_input_is_trimmed() {
        let padded = format!("\n\n   {}   \n", SAMPLE);
        assert_eq!(grade(&padded, &keywords()), grade(SAMPLE, &keywords()));
    }

    #[test]
    fn test_adding_present_keyword_never_lowers_score() {
        for text in corpus() {
            let mut kws = vec!["saúde", "educação"];
            let before = grade(text, &kws).structure_content_total;
            kws.push("desigualdade");
            let after = grade(text, &kws).structure_content_total;
            if text.contains("desigualdade") {
                assert!(after >= before, "coverage dropped for {:?}", text);
            }
        }
    }

    #[test]
    fn test_orthography_saturates_end_to_end() {
        let three = grade::<&str>("seculo seculo seculo", &[]);
        let ten = grade::<&str>(&"seculo ".repeat(10), &[]);
        assert_eq!(
            three.expression_detail.get(Criterion::Orthography),
            ten.expression_detail.get(Criterion::Orthography)
        );
    }

    #[test]
    fn test_breakdown_order_and_labels() {
        let result = grade::<&str>(SAMPLE, &[]);
        let expression: Vec<Criterion> = result.expression_detail.iter().map(|c| c.criterion).collect();
        let structure: Vec<Criterion> = result.structure_detail.iter().map(|c| c.criterion).collect();
        assert_eq!(expression, Criterion::EXPRESSION.to_vec());
        assert_eq!(structure, Criterion::STRUCTURE.to_vec());
        assert_eq!(
            result.structure_detail.get_by_label("Investimento autoral"),
            Some(6.0)
        );
    }

    #[test]
    fn test_custom_rubric_changes_scores() {
        let lexicon = Lexicon {
            filler_words: vec!["tema".to_string()],
            ..Lexicon::default()
        };
        let rubric = Rubric::new(Thresholds::default(), lexicon);
        let result = grade_with(SAMPLE, &keywords(), &rubric);
        assert_eq!(result.expression_detail.get(Criterion::Semantics), Some(9.5));
    }

    #[test]
    fn test_custom_thesis_marker_is_matched() {
        let lexicon = Lexicon {
            thesis_markers: vec!["tema importante".to_string()],
            connectives: vec![],
            ..Lexicon::default()
        };
        let rubric = Rubric::new(Thresholds::default(), lexicon);
        let result = grade_with(SAMPLE, &keywords(), &rubric);
        assert_eq!(result.expression_detail.get(Criterion::Typology), Some(6.5));
    }

    #[test]
    fn test_one_rubric_grades_many_essays() {
        let rubric = Rubric::default();
        for text in corpus() {
            assert_eq!(grade_with(text, &keywords(), &rubric), grade(text, &keywords()));
        }
    }

    #[test]
    fn test_result_serializes_to_json() {
        let result = grade(SAMPLE, &keywords());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_25"], serde_json::json!(18.9));
        assert_eq!(
            json["expression_detail"]["Convenções ortográficas"],
            serde_json::json!(8.5)
        );
        assert_eq!(json["structure_detail"]["Coesão textual"], serde_json::json!(3.6));
        assert_eq!(json["structure_detail"].as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_breakdown_json_keeps_rubric_order() {
        let result = grade(SAMPLE, &keywords());
        let json = serde_json::to_string(&result.structure_detail).unwrap();
        let positions: Vec<usize> = Criterion::STRUCTURE
            .iter()
            .map(|c| json.find(c.label()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", json);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(41.5), 41.5);
    }

    #[test]
    fn test_round2_uses_stored_value_on_near_ties() {
        // both quotients are stored just below the .xx5 tie
        assert_eq!(round2(68.3 / 4.0), 17.07);
        assert_eq!(round2(63.3 / 4.0), 15.82);
    }

    #[test]
    fn test_scale_to_25_near_ties() {
        assert_eq!(scale_to_25(68.3), 17.07);
        assert_eq!(scale_to_25(63.3), 15.82);
        assert_eq!(scale_to_25(75.6), 18.9);
        assert_eq!(scale_to_25(100.0), 25.0);
        assert_eq!(scale_to_25(0.0), 0.0);
    }
}
