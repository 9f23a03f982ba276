//! Lenient CSV reader for the profiles sheet.
//!
//! This is intentionally not RFC 4180: a line is scanned for tokens that are
//! either a double-quoted run or a bare run without commas, quotes or
//! whitespace, and a token only counts when a comma or the end of the line
//! follows it. Escaped quotes inside quoted cells are not unescaped, and quoted
//! cells never span lines.

use std::sync::LazyLock;

use regex::Regex;

use super::models::Row;

// U+FEFF is treated as whitespace so a byte order mark never sticks to the
// first header.
static BARE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[^",\s\x{FEFF}]+"#).expect("valid bare token pattern"));

static DELIMITER_AHEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\x{FEFF}]*(?:,|$)").expect("valid delimiter pattern"));

/// Parses CSV text into rows of cells. Blank lines are dropped; a line with no
/// recognizable token becomes an empty row.
pub fn parse_csv(text: &str) -> Vec<Row> {
    if text.is_empty() {
        tracing::warn!("Empty CSV text received");
        return Vec::new();
    }

    let sample: String = text.chars().take(100).collect();
    tracing::debug!("CSV data sample: {sample}...");

    let rows: Vec<Row> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim_matches(is_blank_char).is_empty())
        .map(tokenize_line)
        .collect();

    if rows.is_empty() {
        tracing::warn!("No valid lines found in CSV");
    } else {
        tracing::debug!("Found {} lines in CSV", rows.len());
        tracing::debug!("CSV headers: {:?}", rows[0]);
    }

    rows
}

/// Byte-level entry point. Input that is not UTF-8 yields no rows.
pub fn parse_csv_bytes(bytes: &[u8]) -> Vec<Row> {
    match std::str::from_utf8(bytes) {
        Ok(text) => parse_csv(text),
        Err(e) => {
            tracing::error!("Invalid CSV data received: {e}");
            Vec::new()
        }
    }
}

fn tokenize_line(line: &str) -> Row {
    let mut cells = Vec::new();
    let mut pos = 0;

    while pos < line.len() {
        match token_end_at(line, pos) {
            Some(end) => {
                cells.push(strip_quotes(&line[pos..end]).to_string());
                pos = end;
            }
            None => {
                pos += line[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    cells
}

/// End offset of the token starting at `start`, if one is accepted there.
fn token_end_at(line: &str, start: usize) -> Option<usize> {
    let rest = &line[start..];

    if let Some(body) = rest.strip_prefix('"') {
        // Try the nearest closing quote first and move outward, so `"a"b","c"`
        // still finds a token when the first candidate is not followed by a
        // delimiter.
        for (i, c) in body.char_indices() {
            if is_line_terminator(c) {
                return None;
            }
            if c == '"' {
                let end = start + 1 + i + 1;
                if delimiter_follows(&line[end..]) {
                    return Some(end);
                }
            }
        }
        return None;
    }

    let end = start + BARE_TOKEN.find(rest)?.end();
    delimiter_follows(&line[end..]).then_some(end)
}

fn delimiter_follows(rest: &str) -> bool {
    DELIMITER_AHEAD.is_match(rest)
}

fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\r' | '\u{2028}' | '\u{2029}')
}

fn strip_quotes(token: &str) -> &str {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        &token[1..token.len() - 1]
    } else {
        token
    }
}
