// src/table/parser.rs

use tracing::{debug, instrument, trace};

use super::Table;

/// Parse CSV text with a header row into a `Table`.
///
/// Never fails: malformed quoting degrades to best-effort splitting. A blank
/// input gives an empty table with no columns.
#[instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn parse_table(text: &str) -> Table {
    let mut rows = parse_rows(text).into_iter();
    match rows.next() {
        Some(header) => {
            let table = Table::new(header, rows.collect());
            debug!(
                columns = table.headers().len(),
                records = table.len(),
                "parsed table"
            );
            table
        }
        None => {
            debug!("no rows found");
            Table::default()
        }
    }
}

/// Split CSV text into rows of fields, header included.
///
/// Quoting rules:
/// - a `"` opens a quoted field only when nothing but whitespace precedes it
///   in the field; elsewhere it is literal
/// - inside quotes `""` is one literal `"`, and commas and line breaks are
///   field content
/// - a lone `"` inside quotes closes the field only when followed (after
///   optional spaces/tabs) by `,`, a line break or the end of text; otherwise
///   it is kept as a literal quote
///
/// Unquoted fields are trimmed, quoted contents are kept verbatim. `\r\n`
/// counts as one line break. A lone `\r` is dropped outside quotes and kept
/// inside them. Rows whose fields are all empty are skipped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut scan = Scanner::default();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if scan.in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    scan.field.push('"');
                }
                '"' if closes_quote(chars.clone()) => scan.in_quotes = false,
                '\r' if chars.peek() == Some(&'\n') => {}
                _ => scan.field.push(c),
            }
            continue;
        }

        match c {
            '"' if !scan.quoted && scan.field.trim().is_empty() => {
                scan.field.clear();
                scan.in_quotes = true;
                scan.quoted = true;
            }
            ',' => scan.end_field(),
            '\n' => scan.end_row(),
            '\r' => {}
            // only padding can follow a closing quote
            _ if scan.quoted => {}
            _ => scan.field.push(c),
        }
    }

    if scan.in_quotes {
        debug!("unterminated quoted field at end of text");
    }
    scan.end_row();

    debug!(rows = scan.rows.len(), "finished CSV scan");
    scan.rows
}

/// Does a quote followed by `rest` end a quoted field?
fn closes_quote(mut rest: impl Iterator<Item = char>) -> bool {
    matches!(
        rest.find(|c| *c != ' ' && *c != '\t'),
        None | Some(',' | '\n' | '\r')
    )
}

#[derive(Default)]
struct Scanner {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    field: String,
    in_quotes: bool,
    /// The current field started with an opening quote.
    quoted: bool,
}

impl Scanner {
    fn end_field(&mut self) {
        let raw = std::mem::take(&mut self.field);
        let value = if self.quoted {
            raw
        } else {
            raw.trim().to_string()
        };
        self.row.push(value);
        self.quoted = false;
        self.in_quotes = false;
    }

    fn end_row(&mut self) {
        self.end_field();
        let row = std::mem::take(&mut self.row);
        if row.iter().any(|f| !f.is_empty()) {
            trace!(?row, "accepted row");
            self.rows.push(row);
        }
    }
}
