use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::scoring::{Breakdown, GradingResult};

/// Width of the label column in criterion tables (longest rubric label).
const LABEL_WIDTH: usize = 44;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score against its maximum: "8.5/10", "12/12", "0.25/8"
pub fn format_score(value: f64, max: f64) -> String {
    format!("{}/{}", trim_decimals(value), trim_decimals(max))
}

/// Two decimals at most, without trailing zeros
fn trim_decimals(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Color a score by how close it is to its maximum.
fn paint(text: &str, value: f64, max: f64, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    let ratio = if max > 0.0 { value / max } else { 0.0 };
    if ratio >= 0.8 {
        text.green().to_string()
    } else if ratio >= 0.5 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}

/// Format one scorer's criteria as an aligned table under a heading
pub fn format_breakdown(heading: &str, breakdown: &Breakdown, use_colors: bool) -> String {
    let heading = if use_colors {
        heading.bold().to_string()
    } else {
        heading.to_string()
    };

    let rows = breakdown.iter().map(|c| {
        let score = paint(&format_score(c.value, c.max), c.value, c.max, use_colors);
        format!("  {:<width$}  {}", c.label, score, width = LABEL_WIDTH)
    });

    std::iter::once(heading)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the full grading report: totals first, then both breakdowns
pub fn format_report(result: &GradingResult, use_colors: bool) -> String {
    let totals = [
        ("Expressão", result.expression_total, 50.0),
        ("Estrutura e conteúdo", result.structure_content_total, 50.0),
        ("Total", result.total_100, 100.0),
        ("Nota (escala 0-25)", result.total_25, 25.0),
    ];

    let mut lines: Vec<String> = totals
        .iter()
        .map(|(label, value, max)| {
            let score = paint(&format_score(*value, *max), *value, *max, use_colors);
            format!("{:<22}{}", label, score)
        })
        .collect();

    lines.push(String::new());
    lines.push(format_breakdown(
        "Expressão",
        &result.expression_detail,
        use_colors,
    ));
    lines.push(String::new());
    lines.push(format_breakdown(
        "Estrutura e conteúdo",
        &result.structure_detail,
        use_colors,
    ));

    lines.join("\n")
}

/// Format the result as pretty-printed JSON
pub fn format_json(result: &GradingResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Format every criterion as tab-separated values for scripting
/// Columns: criterion, label, value, max (no headers, no colors)
pub fn format_tsv(result: &GradingResult) -> String {
    result
        .expression_detail
        .iter()
        .chain(result.structure_detail.iter())
        .map(|c| {
            let criterion = serde_json::to_value(c.criterion)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            format!("{}\t{}\t{}\t{}", criterion, c.label, c.value, c.max)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::grade;

    fn sample_result() -> GradingResult {
        grade(
            "A inclusão digital é um tema importante. Portanto, é preciso investir \
             em educação e reduzir a desigualdade.",
            &["inclusão digital", "educação", "desigualdade"],
        )
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(8.5, 10.0), "8.5/10");
        assert_eq!(format_score(12.0, 12.0), "12/12");
        assert_eq!(format_score(0.25, 8.0), "0.25/8");
        assert_eq!(format_score(0.0, 10.0), "0/10");
        assert_eq!(format_score(18.9, 25.0), "18.9/25");
    }

    #[test]
    fn test_format_breakdown_lists_all_criteria() {
        let result = sample_result();
        let table = format_breakdown("Expressão", &result.expression_detail, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Expressão");
        assert!(lines[1].contains("Convenções ortográficas"));
        assert!(lines[1].ends_with("8.5/10"));
        assert!(lines[5].contains("Domínio da tipologia (argumentação)"));
    }

    #[test]
    fn test_format_breakdown_aligns_scores() {
        let result = sample_result();
        let table = format_breakdown("Estrutura", &result.structure_detail, false);
        let columns: Vec<usize> = table
            .lines()
            .skip(1)
            .map(|l| l.chars().count() - l.split_whitespace().last().unwrap().chars().count())
            .collect();
        assert!(columns.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_format_report_plain() {
        let result = sample_result();
        let report = format_report(&result, false);
        assert!(report.starts_with("Expressão"));
        assert!(report.contains("47/50"));
        assert!(report.contains("75.6/100"));
        assert!(report.contains("18.9/25"));
        assert!(report.contains("Investimento autoral"));
        // no ANSI escapes without colors
        assert!(!report.contains('\u{1b}'));
    }

    #[test]
    fn test_format_report_colored() {
        let report = format_report(&sample_result(), true);
        assert!(report.contains('\u{1b}'));
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&sample_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_100"], serde_json::json!(75.6));
        assert_eq!(value["expression_detail"]["Pontuação"], serde_json::json!(8.0));
        assert_eq!(value["structure_detail"]["Investimento autoral"], serde_json::json!(6.0));
    }

    #[test]
    fn test_format_json_details_in_rubric_order() {
        let json = format_json(&sample_result()).unwrap();
        let orthography = json.find("\"Convenções ortográficas\"").unwrap();
        let typology = json.find("\"Domínio da tipologia (argumentação)\"").unwrap();
        let organization = json.find("\"Organização do texto (título, parágrafos)\"").unwrap();
        assert!(orthography < typology && typology < organization);
    }

    #[test]
    fn test_format_tsv() {
        let tsv = format_tsv(&sample_result());
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "orthography\tConvenções ortográficas\t8.5\t10");
        assert!(lines[9].starts_with("authorship\t"));
        assert_eq!(lines[9].split('\t').count(), 4);
    }
}
