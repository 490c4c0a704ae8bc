//! Deterministic document encoder.
//!
//! Encoding runs in two passes over the root table:
//!
//! 1. **Section planning**: a depth-first walk, keys in lexicographic order,
//!    records every non-empty table reached through a key as a `[path]`
//!    section, and every array made only of tables (at least one of them
//!    non-empty) as a run of `[[path]]` sections.
//! 2. **Emission**: the root's remaining keys are written as `key = value`
//!    lines, then each planned section is written as a header followed by its
//!    own remaining keys.
//!
//! Everything that is not promoted to a section renders inline: arrays always
//! span multiple lines with a trailing comma after every element, tables as
//! `{ k = v, ... }` on one line.

use crate::{EncodeOptions, Number, Table, Value};
use tracing::debug;

#[derive(Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Table,
    ArrayElement,
}

struct Section<'a> {
    path: Vec<&'a str>,
    kind: SectionKind,
    table: &'a Table,
}

/// Encodes a root table as document text.
pub(crate) fn encode_document(root: &Table, options: &EncodeOptions) -> String {
    let mut sections = Vec::new();
    plan_sections(root, &mut Vec::new(), &mut sections);

    let mut out = String::with_capacity(256);
    write_inline_entries(&mut out, root, options);

    for section in &sections {
        if !out.is_empty() {
            out.push('\n');
        }
        let (open, close) = match section.kind {
            SectionKind::Table => ("[", "]"),
            SectionKind::ArrayElement => ("[[", "]]"),
        };
        out.push_str(open);
        for (i, segment) in section.path.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            write_key(&mut out, segment);
        }
        out.push_str(close);
        out.push('\n');
        write_inline_entries(&mut out, section.table, options);
    }

    debug!(sections = sections.len(), bytes = out.len(), "encoded document");
    out
}

fn plan_sections<'a>(table: &'a Table, path: &mut Vec<&'a str>, sections: &mut Vec<Section<'a>>) {
    for (key, value) in table.sorted_entries() {
        path.push(key.as_str());
        match value {
            Value::Table(child) if !child.is_empty() => {
                sections.push(Section {
                    path: path.clone(),
                    kind: SectionKind::Table,
                    table: child,
                });
                plan_sections(child, path, sections);
            }
            Value::Array(elements) if is_table_array(value) => {
                for element in elements {
                    if let Value::Table(child) = element {
                        sections.push(Section {
                            path: path.clone(),
                            kind: SectionKind::ArrayElement,
                            table: child,
                        });
                        plan_sections(child, path, sections);
                    }
                }
            }
            _ => {}
        }
        path.pop();
    }
}

/// An array that is written as `[[path]]` sections.
fn is_table_array(value: &Value) -> bool {
    match value {
        Value::Array(elements) => {
            !elements.is_empty() && elements.iter().all(Value::is_table) && value.is_complex()
        }
        _ => false,
    }
}

/// `true` if a key's value is written by a section rather than inline.
fn is_sectioned(value: &Value) -> bool {
    match value {
        Value::Table(table) => !table.is_empty(),
        _ => is_table_array(value),
    }
}

fn write_inline_entries(out: &mut String, table: &Table, options: &EncodeOptions) {
    for (key, value) in table.sorted_entries() {
        if is_sectioned(value) {
            continue;
        }
        write_key(out, key);
        out.push_str(" = ");
        write_value(out, value, 0, options);
        out.push('\n');
    }
}

/// Writes a key segment bare when possible, quoted otherwise.
fn write_key(out: &mut String, key: &str) {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if bare {
        out.push_str(key);
    } else {
        write_quoted(out, key);
    }
}

/// Writes a value in inline form; `indent` is the column of the enclosing line.
pub(crate) fn write_value(out: &mut String, value: &Value, indent: usize, options: &EncodeOptions) {
    match value {
        Value::String(s) if s.contains('\n') => write_multi_line(out, s),
        Value::String(s) => write_quoted(out, s),
        Value::Number(n) => write_number(out, n),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Array(elements) => write_array(out, elements, indent, options),
        Value::Table(table) => write_inline_table(out, table, indent, options),
    }
}

fn write_number(out: &mut String, number: &Number) {
    out.push_str(&number.to_string());
}

fn write_array(out: &mut String, elements: &[Value], indent: usize, options: &EncodeOptions) {
    if elements.is_empty() {
        out.push_str("[]");
        return;
    }

    let inner = indent + options.indent;
    out.push_str("[\n");
    for element in elements {
        push_spaces(out, inner);
        write_value(out, element, inner, options);
        out.push_str(",\n");
    }
    push_spaces(out, indent);
    out.push(']');
}

fn write_inline_table(out: &mut String, table: &Table, indent: usize, options: &EncodeOptions) {
    if table.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{ ");
    for (i, (key, value)) in table.sorted_entries().into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_key(out, key);
        out.push_str(" = ");
        write_value(out, value, indent, options);
    }
    out.push_str(" }");
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"), // backspace
            '\u{000C}' => out.push_str("\\f"), // form feed
            _ => out.push(ch),
        }
    }
    out.push('"');
}

/// Newlines stay raw; the newline after the opening delimiter is dropped on parse.
fn write_multi_line(out: &mut String, s: &str) {
    out.push_str("\"\"\"\n");
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            _ => out.push(ch),
        }
    }
    out.push_str("\"\"\"");
}

fn push_spaces(out: &mut String, count: usize) {
    out.extend(std::iter::repeat(' ').take(count));
}
