//! Minimal span-based reader for KiCad S-expression text.
//!
//! Files are never parsed into a full tree. A located block or entry
//! carries byte spans into the original source, edits splice replacement
//! text into exactly those spans, and every other byte passes through
//! untouched. Quoted strings are honored while scanning, so parentheses
//! inside values cannot unbalance a block.

use std::ops::Range;

/// A named `(name ...)` block located in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Span of the whole block, both parentheses included.
    pub span: Range<usize>,
    /// Span of the content between the block name and the closing
    /// parenthesis.
    pub inner: Range<usize>,
}

/// A `(KEY "value")` entry directly inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    /// Unquoted text of the first quoted argument, if the entry has one.
    pub value: Option<String>,
    /// Span of the whole entry, both parentheses included.
    pub span: Range<usize>,
    /// Span of the first quoted argument, quotes included.
    pub value_span: Option<Range<usize>>,
}

/// Find the first `(name ...)` block anywhere in `source`.
pub fn find_block(source: &str, name: &str) -> Option<Block> {
    scan_blocks(source, name, true).into_iter().next()
}

/// Find every `(name ...)` block in `source`, in order of appearance.
///
/// Matched blocks are skipped over wholesale, so a `name` block nested
/// inside another `name` block is not reported separately.
pub fn find_blocks(source: &str, name: &str) -> Vec<Block> {
    scan_blocks(source, name, false)
}

fn scan_blocks(source: &str, name: &str, first_only: bool) -> Vec<Block> {
    let bytes = source.as_bytes();
    let mut blocks = Vec::new();
    let mut in_string = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_string => i += 1,
            b'"' => in_string = !in_string,
            b'(' if !in_string => {
                if names_match(source, i, name)
                    && let Some(close) = close_paren(source, i)
                {
                    blocks.push(Block {
                        span: i..close + 1,
                        inner: i + 1 + name.len()..close,
                    });
                    if first_only {
                        return blocks;
                    }
                    i = close + 1;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    blocks
}

/// The direct children of `block` that look like `(KEY ...)` entries.
pub fn entries(source: &str, block: &Block) -> Vec<Entry> {
    let bytes = source.as_bytes();
    let mut out = Vec::new();
    let mut in_string = false;
    let mut i = block.inner.start;
    while i < block.inner.end {
        match bytes[i] {
            b'\\' if in_string => i += 1,
            b'"' => in_string = !in_string,
            b'(' if !in_string => {
                if let Some(entry) = parse_entry(source, i) {
                    i = entry.span.end;
                    out.push(entry);
                    continue;
                }
                // Child without a readable key or closing paren; step over
                // it if it closes at all.
                if let Some(close) = close_paren(source, i) {
                    i = close + 1;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    out
}

/// The quoted arguments appearing directly inside `block`, nested blocks
/// skipped. For `(property "Sheetfile" "cpu.kicad_sch" (at ...))` this
/// yields `["Sheetfile", "cpu.kicad_sch"]`.
pub fn quoted_args(source: &str, block: &Block) -> Vec<String> {
    let bytes = source.as_bytes();
    let mut out = Vec::new();
    let mut i = block.inner.start;
    while i < block.inner.end {
        match bytes[i] {
            b'"' => {
                let Some(end) = string_end(source, i) else {
                    break;
                };
                out.push(source[i + 1..end].to_string());
                i = end + 1;
            }
            b'(' => {
                let Some(close) = close_paren(source, i) else {
                    break;
                };
                i = close + 1;
            }
            _ => i += 1,
        }
    }
    out
}

/// Rebuild `source` with `span` replaced by `replacement`.
pub fn splice(source: &str, span: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(source.len() + replacement.len());
    out.push_str(&source[..span.start]);
    out.push_str(replacement);
    out.push_str(&source[span.end..]);
    out
}

/// Insertion point for appending an entry to `block`: directly after its
/// last non-whitespace content, so the closing parenthesis line keeps its
/// original indentation.
pub fn append_point(source: &str, block: &Block) -> usize {
    let inner = &source[block.inner.clone()];
    block.inner.start + inner.trim_end().len()
}

fn names_match(source: &str, open: usize, name: &str) -> bool {
    let rest = &source[open + 1..];
    if !rest.starts_with(name) {
        return false;
    }
    match rest.as_bytes().get(name.len()) {
        None => false,
        Some(b) => b.is_ascii_whitespace() || matches!(b, b'(' | b')' | b'"'),
    }
}

/// Index of the `)` closing the parenthesis opened at `open`.
fn close_paren(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_string => i += 1,
            b'"' => in_string = !in_string,
            b'(' if !in_string => depth += 1,
            b')' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the `"` closing the string opened at `open_quote`.
fn string_end(source: &str, open_quote: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut i = open_quote + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'"' => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

fn parse_entry(source: &str, open: usize) -> Option<Entry> {
    let close = close_paren(source, open)?;
    let bytes = source.as_bytes();

    let key_start = open + 1;
    let mut i = key_start;
    while i < close && !bytes[i].is_ascii_whitespace() && !matches!(bytes[i], b'(' | b')' | b'"') {
        i += 1;
    }
    if i == key_start {
        return None;
    }
    let key = source[key_start..i].to_string();

    // First quoted argument before any nested block, if present.
    let mut value = None;
    let mut value_span = None;
    while i < close {
        match bytes[i] {
            b'"' => {
                let end = string_end(source, i)?;
                value = Some(source[i + 1..end].to_string());
                value_span = Some(i..end + 1);
                break;
            }
            b'(' => break,
            _ => i += 1,
        }
    }

    Some(Entry {
        key,
        value,
        span: open..close + 1,
        value_span,
    })
}
