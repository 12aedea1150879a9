//! Headered snapshot dialect
//!
//! Comma-separated with a header row. Columns are bound by name
//! (case-insensitive), so their order is free; unknown columns are ignored
//! and missing ones leave the field empty.

use crate::types::{ReconcileError, Result, SignalRecord};
use std::collections::HashMap;
use std::path::Path;

const PAIR: &str = "pair";
const MARKET_PHASE: &str = "market_phase";
const LAST_SIGNAL: &str = "last_signal";
const DATE: &str = "date";
const SOURCE_SUMMARY: &str = "source_summary";

/// Parse headered snapshot content
///
/// A row whose field count differs from the header, a quoted field that is
/// never closed, or any other structural CSV failure fails the whole file.
pub fn parse(content: &str, path: &Path) -> Result<Vec<SignalRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .clone();
    let columns = build_header_map(&headers);

    if !columns.contains_key(PAIR) {
        log::warn!("No Pair column in {:?}, pairs will be empty", path);
    }

    let mut records = Vec::new();
    let mut last_line = None;
    for result in reader.records() {
        let row = result.map_err(|e| csv_error(path, e))?;
        last_line = row.position().map(|pos| pos.line());

        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        let field = |name: &str| -> String {
            columns
                .get(name)
                .and_then(|&idx| row.get(idx))
                .unwrap_or("")
                .to_string()
        };

        records.push(SignalRecord {
            pair: field(PAIR),
            market_phase: field(MARKET_PHASE),
            last_signal: field(LAST_SIGNAL),
            date: field(DATE),
            source_summary: field(SOURCE_SUMMARY),
        });
    }

    // The csv reader runs an open quote to end of input without complaint
    if has_unterminated_quote(content) {
        let message = match last_line {
            Some(line) => format!("line {}: unterminated quoted field", line),
            None => "unterminated quoted field".to_string(),
        };
        return Err(ReconcileError::CsvParse {
            path: path.to_path_buf(),
            message,
        });
    }

    Ok(records)
}

/// Check whether a quoted field is still open at end of input
///
/// A quote only opens a field at its start; elsewhere it is literal.
/// Inside a quoted field `""` is an escaped quote.
fn has_unterminated_quote(content: &str) -> bool {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        FieldStart,
        InField,
        InQuotes,
        QuoteInQuotes,
    }

    let mut state = State::FieldStart;
    for c in content.chars() {
        state = match (state, c) {
            (State::InQuotes, '"') => State::QuoteInQuotes,
            (State::InQuotes, _) => State::InQuotes,
            (State::QuoteInQuotes, '"') => State::InQuotes,
            (State::FieldStart, '"') => State::InQuotes,
            (_, ',' | '\n' | '\r') => State::FieldStart,
            _ => State::InField,
        };
    }

    state == State::InQuotes
}

/// Map lower-cased header names to column indices
///
/// The first occurrence of a duplicated header wins.
fn build_header_map(headers: &csv::StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        let key = name.trim_start_matches('\u{feff}').trim().to_lowercase();
        map.entry(key).or_insert(idx);
    }
    map
}

fn csv_error(path: &Path, e: csv::Error) -> ReconcileError {
    let message = match e.position() {
        Some(pos) => format!("line {}: {}", pos.line(), e),
        None => e.to_string(),
    };
    ReconcileError::CsvParse {
        path: path.to_path_buf(),
        message,
    }
}
