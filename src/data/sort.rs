use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use serde::{Deserialize, Serialize};

use super::classify::{classify, Role};
use super::model::{ComparableValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

thread_local! {
    static JA_COLLATOR: Option<Collator> =
        Collator::try_new(&locale!("ja").into(), CollatorOptions::new())
            .map_err(|e| log::warn!("ja collation unavailable, using codepoint order: {e}"))
            .ok();
}

/// Japanese collation (kana by reading, kanji in JIS order) with a
/// codepoint tie-break, so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    JA_COLLATOR
        .with(|collator| match collator {
            Some(c) => c.compare(a, b),
            None => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}

fn cell_text(raw: &str) -> String {
    raw.replace('\n', " ").trim().to_string()
}

/// Compare two raw cells. Empty cells sort last in both directions.
pub fn compare_cells(a: &str, b: &str, role: Role, dir: SortDirection) -> Ordering {
    let ca = classify(a, role);
    let cb = classify(b, role);

    let ord = match (&ca, &cb) {
        (ComparableValue::Empty, ComparableValue::Empty) => return Ordering::Equal,
        (ComparableValue::Empty, _) => return Ordering::Greater,
        (_, ComparableValue::Empty) => return Ordering::Less,
        (ComparableValue::Numeric(x), ComparableValue::Numeric(y)) => x.total_cmp(y),
        (ComparableValue::Text(x), ComparableValue::Text(y)) => locale_cmp(x, y),
        // Inconsistently formatted column: compare as strings.
        _ => locale_cmp(&cell_text(a), &cell_text(b)),
    };

    match dir {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

/// Stable sort of `rows` by `column`.
pub fn sort_rows(rows: &mut [&Record], column: &str, role: Role, dir: SortDirection) {
    rows.sort_by(|a, b| {
        let va = a.get(column).map(String::as_str).unwrap_or("");
        let vb = b.get(column).map(String::as_str).unwrap_or("");
        compare_cells(va, vb, role, dir)
    });
}
