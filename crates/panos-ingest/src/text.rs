//! Cell text normalization.
//!
//! Block-level elements force line boundaries, `<br>` emits one newline,
//! every other element is transparent. Source-formatting whitespace is
//! collapsed, lines are trimmed, and blank-line runs are limited to one
//! empty line.

use crate::document::DocNode;

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "dt", "dd", "tr", "h1", "h2", "h3", "h4", "h5", "h6",
];

const LIST_TAGS: &[&str] = &["ul", "ol", "dl"];

fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag) || LIST_TAGS.contains(&tag)
}

/// Collapses every whitespace run (newlines included) to one space.
///
/// Leading and trailing runs are kept as a single space so adjacent text
/// nodes stay separated.
pub fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_space = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

/// Normalized text of a table cell (or any element's content).
pub fn cell_text<N: DocNode>(cell: &N) -> String {
    let mut raw = String::new();
    for child in cell.children() {
        walk(child, &mut raw);
    }
    finish_lines(&raw)
}

fn walk<N: DocNode>(node: &N, out: &mut String) {
    if let Some(text) = node.text_content() {
        out.push_str(&collapse_whitespace(text));
        return;
    }
    let Some(tag) = node.tag_name() else {
        return;
    };
    if tag == "br" {
        out.push('\n');
        return;
    }
    let block = is_block(tag);
    if block {
        out.push('\n');
    }
    for child in node.children() {
        walk(child, out);
    }
    if block {
        out.push('\n');
    }
}

fn finish_lines(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut blank_run = 0usize;
    for line in raw.split('\n') {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }
    lines.join("\n").trim().to_string()
}
