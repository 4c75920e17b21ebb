use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::model::{ColumnKind, ComparableValue, Record};

/// How many non-empty cells are sampled when guessing a column's kind.
pub const SAMPLE_SIZE: usize = 20;
/// Fraction of sampled cells that must be numeric for a numeric column.
pub const NUMERIC_RATIO: f64 = 0.6;

/// Semantic role of a column, affecting how numbers are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Plain,
    /// Innings pitched: `.1` is one third, `.2` is two thirds.
    Innings,
}

fn decimal_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?$").expect("static regex"))
}

/// Classify one raw cell.
pub fn classify(raw: &str, role: Role) -> ComparableValue {
    let s = raw.trim();
    if s.is_empty() {
        return ComparableValue::Empty;
    }
    if !decimal_pattern().is_match(s) {
        return ComparableValue::Text(s.to_string());
    }
    let value = match role {
        Role::Plain => s.parse::<f64>().ok(),
        Role::Innings => innings_value(s),
    };
    match value {
        Some(n) => ComparableValue::Numeric(n),
        None => ComparableValue::Text(s.to_string()),
    }
}

/// `s` is already known to match the decimal pattern.
fn innings_value(s: &str) -> Option<f64> {
    match s.split_once('.') {
        Some((whole, "1")) => whole.parse::<f64>().ok().map(|w| w + 1.0 / 3.0),
        Some((whole, "2")) => whole.parse::<f64>().ok().map(|w| w + 2.0 / 3.0),
        // Any other fraction is read as a plain decimal.
        _ => s.parse::<f64>().ok(),
    }
}

/// Sample up to the first [`SAMPLE_SIZE`] non-empty cells of `column` and report
/// whether at least [`NUMERIC_RATIO`] of them classify as numbers.
pub fn looks_numeric_column<'a, I>(rows: I, column: &str, role: Role) -> bool
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut seen = 0usize;
    let mut numeric = 0usize;
    for row in rows {
        let Some(raw) = row.get(column) else {
            continue;
        };
        match classify(raw, role) {
            ComparableValue::Empty => continue,
            ComparableValue::Numeric(_) => numeric += 1,
            ComparableValue::Text(_) => {}
        }
        seen += 1;
        if seen >= SAMPLE_SIZE {
            break;
        }
    }
    seen > 0 && numeric as f64 / seen as f64 >= NUMERIC_RATIO
}

/// One pass over every header column, computed alongside parsing.
pub fn infer_schema<F>(
    header: &[String],
    rows: &[Record],
    role_of: F,
) -> BTreeMap<String, ColumnKind>
where
    F: Fn(&str) -> Role,
{
    header
        .iter()
        .map(|col| {
            let kind = if looks_numeric_column(rows, col, role_of(col)) {
                ColumnKind::Numeric
            } else {
                ColumnKind::Text
            };
            (col.clone(), kind)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(v: &ComparableValue, expected: f64) -> bool {
        v.as_f64().is_some_and(|n| (n - expected).abs() < 1e-3)
    }

    #[test]
    fn plain_classification() {
        assert_eq!(classify("", Role::Plain), ComparableValue::Empty);
        assert_eq!(classify("   ", Role::Plain), ComparableValue::Empty);
        assert_eq!(classify("12", Role::Plain), ComparableValue::Numeric(12.0));
        assert_eq!(classify("12.5", Role::Plain), ComparableValue::Numeric(12.5));
        assert_eq!(classify(" -3 ", Role::Plain), ComparableValue::Numeric(-3.0));
        assert_eq!(classify("abc", Role::Plain), ComparableValue::Text("abc".into()));
        assert_eq!(classify(".300", Role::Plain), ComparableValue::Text(".300".into()));
        assert_eq!(classify("1e5", Role::Plain), ComparableValue::Text("1e5".into()));
        assert_eq!(classify("6-5", Role::Plain), ComparableValue::Text("6-5".into()));
    }

    #[test]
    fn full_width_digits_are_text() {
        assert!(matches!(classify("１２", Role::Plain), ComparableValue::Text(_)));
    }

    #[test]
    fn innings_thirds() {
        assert!(approx(&classify("6.1", Role::Innings), 6.333));
        assert!(approx(&classify("6.2", Role::Innings), 6.667));
        assert!(approx(&classify("6", Role::Innings), 6.0));
    }

    #[test]
    fn innings_other_fraction_is_plain_decimal() {
        assert_eq!(classify("6.5", Role::Innings), ComparableValue::Numeric(6.5));
        assert_eq!(classify("6.12", Role::Innings), ComparableValue::Numeric(6.12));
    }

    #[test]
    fn plain_role_ignores_thirds() {
        assert_eq!(classify("6.1", Role::Plain), ComparableValue::Numeric(6.1));
    }

    fn rec(col: &str, v: &str) -> Record {
        let mut r = Record::new();
        r.insert(col.to_string(), v.to_string());
        r
    }

    #[test]
    fn numeric_column_threshold() {
        // 3 of 5 non-empty cells numeric: exactly 60%.
        let rows: Vec<Record> = ["1", "2", "", "x", "3", "y"]
            .iter()
            .map(|v| rec("c", v))
            .collect();
        assert!(looks_numeric_column(&rows, "c", Role::Plain));

        let rows: Vec<Record> = ["1", "x", "y"].iter().map(|v| rec("c", v)).collect();
        assert!(!looks_numeric_column(&rows, "c", Role::Plain));
    }

    #[test]
    fn numeric_column_samples_first_twenty() {
        let mut rows: Vec<Record> = (0..20).map(|i| rec("c", &i.to_string())).collect();
        rows.extend((0..100).map(|_| rec("c", "text")));
        assert!(looks_numeric_column(&rows, "c", Role::Plain));
    }

    #[test]
    fn empty_column_is_not_numeric() {
        let rows: Vec<Record> = vec![rec("c", ""), rec("c", " ")];
        assert!(!looks_numeric_column(&rows, "c", Role::Plain));
        assert!(!looks_numeric_column(&rows, "missing", Role::Plain));
    }
}
