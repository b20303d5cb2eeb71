// src/table/write.rs

use super::Table;

/// Serialize a table back to CSV text, header first.
///
/// Fields are quoted only when needed: when they contain a comma, quote or
/// line break, or carry leading/trailing whitespace the parser would trim.
/// Embedded quotes are doubled.
pub fn write_table(table: &Table) -> String {
    let mut out = String::new();
    write_row(&mut out, table.headers());
    for record in table {
        write_row(&mut out, record.values());
    }
    out
}

fn write_row(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_field(out, field);
    }
    out.push('\n');
}

fn write_field(out: &mut String, field: &str) {
    if !needs_quotes(field) {
        out.push_str(field);
        return;
    }
    out.push('"');
    for c in field.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}

fn needs_quotes(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r']) || field.trim() != field
}
