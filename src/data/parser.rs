use std::mem::take;

const BOM: char = '\u{feff}';

/// Lenient CSV parser.
///
/// - `"` opens a quoted span anywhere in a field; `""` inside a span is a literal quote.
/// - Commas and line feeds inside a span are field content.
/// - `\r` is dropped everywhere; `\n` outside a span ends the row.
/// - An unterminated span swallows the rest of the input. There is no error path.
/// - Trailing rows made only of empty fields are dropped.
/// - A leading byte-order mark is ignored.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\r' {
            continue;
        }
        if in_quotes {
            if ch == '"' {
                if matches!(chars.peek(), Some('"')) {
                    chars.next(); // doubled quote
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
            continue;
        }
        match ch {
            '"' => in_quotes = true,
            ',' => row.push(take(&mut field)),
            '\n' => {
                row.push(take(&mut field));
                rows.push(take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    row.push(field);
    rows.push(row);

    while rows
        .last()
        .is_some_and(|r: &Vec<String>| r.iter().all(|f| f.is_empty()))
    {
        rows.pop();
    }
    rows
}
