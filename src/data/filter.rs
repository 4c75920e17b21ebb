use std::collections::BTreeSet;

use super::model::{Dataset, Record};
use super::sort::locale_cmp;

/// Separates fields in the search haystack. Not whitespace, so it survives
/// normalization and keeps a query from matching across two fields.
const FIELD_SEPARATOR: char = '\u{1f}';

/// Collapse whitespace runs to one space, trim and lowercase.
pub fn normalize_for_search(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Remove every whitespace character. Facet values compare in this form.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// A row is hidden when any mandatory column is missing or blank.
pub fn is_hidden(record: &Record, required: &[String]) -> bool {
    required
        .iter()
        .any(|col| record.get(col).map_or(true, |v| v.trim().is_empty()))
}

/// Facet match on the whitespace-stripped cell.
pub fn facet_matches(record: &Record, column: &str, value: &str) -> bool {
    let cell = record.get(column).map(String::as_str).unwrap_or("");
    strip_whitespace(cell) == strip_whitespace(value)
}

/// All normalized fields of a row in header order, joined.
pub fn search_haystack(record: &Record, header: &[String]) -> String {
    let mut out = String::new();
    for (i, value) in header.iter().filter_map(|h| record.get(h)).enumerate() {
        if i > 0 {
            out.push(FIELD_SEPARATOR);
        }
        out.push_str(&normalize_for_search(value));
    }
    out
}

/// `needle` must already be normalized. An empty needle matches everything.
pub fn text_matches(record: &Record, header: &[String], needle: &str) -> bool {
    needle.is_empty() || search_haystack(record, header).contains(needle)
}

/// Distinct, non-blank, whitespace-stripped values of the facet column,
/// in locale order.
pub fn facet_options(dataset: &Dataset, column: &str) -> Vec<String> {
    let distinct: BTreeSet<String> = dataset
        .rows
        .iter()
        .filter_map(|r| r.get(column))
        .map(|v| strip_whitespace(v))
        .filter(|v| !v.is_empty())
        .collect();
    let mut out: Vec<String> = distinct.into_iter().collect();
    out.sort_by(|a, b| locale_cmp(a, b));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns::{OPPONENT, SCORE};

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn normalize_collapses_and_folds() {
        assert_eq!(normalize_for_search("  Hello\r\n  WORLD\t!  "), "hello world !");
        assert_eq!(normalize_for_search(""), "");
    }

    #[test]
    fn hidden_when_required_blank_or_missing() {
        let req = vec![OPPONENT.to_string()];
        assert!(is_hidden(&record(&[(OPPONENT, "  ")]), &req));
        assert!(is_hidden(&record(&[(SCORE, "1-0")]), &req));
        assert!(!is_hidden(&record(&[(OPPONENT, "阪神")]), &req));
        assert!(!is_hidden(&record(&[]), &[]));
    }

    #[test]
    fn facet_ignores_whitespace() {
        let r = record(&[(OPPONENT, " 阪神 タイガース")]);
        assert!(facet_matches(&r, OPPONENT, "阪神タイガース"));
        assert!(!facet_matches(&r, OPPONENT, "阪神"));
    }

    #[test]
    fn search_is_case_insensitive_and_field_bounded() {
        let header = vec!["a".to_string(), "b".to_string()];
        let r = record(&[("a", "Detroit"), ("b", "Lions")]);
        assert!(text_matches(&r, &header, "lion"));
        assert!(text_matches(&r, &header, ""));
        assert!(!text_matches(&r, &header, "troitlions"));
    }

    #[test]
    fn facet_options_distinct_sorted() {
        let ds = Dataset::from_parsed(
            vec![
                vec![OPPONENT.into()],
                vec!["b team".into()],
                vec!["".into()],
                vec!["a".into()],
                vec!["bteam".into()],
            ],
            "",
        );
        assert_eq!(facet_options(&ds, OPPONENT), vec!["a", "bteam"]);
    }

    #[test]
    fn facet_options_in_japanese_order() {
        let ds = Dataset::from_parsed(
            vec![
                vec![OPPONENT.into()],
                vec!["中日".into()],
                vec!["阪神".into()],
                vec!["広島".into()],
                vec!["ヤクルト".into()],
            ],
            "",
        );
        assert_eq!(
            facet_options(&ds, OPPONENT),
            vec!["ヤクルト", "広島", "阪神", "中日"]
        );
    }
}
