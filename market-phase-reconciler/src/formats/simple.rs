//! Simple snapshot dialect
//!
//! One record per line: `PAIR,SENTIMENT,DATE,"DETAILS"`. The quotes around
//! DETAILS are optional and DETAILS may contain commas. Lines that do not
//! fit are dropped with a warning instead of failing the file.

use crate::types::{ReconcileError, Result, SignalRecord};
use regex::Regex;
use std::sync::OnceLock;

const LINE_PATTERN: &str = r#"^([^,]+),([^,]+),([^,]+),"?([^"]*)"?$"#;

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(LINE_PATTERN).expect("simple snapshot pattern is valid"))
}

/// Parse simple snapshot content
///
/// Blank lines are ignored, a leading byte order mark is dropped and a first
/// line mentioning "pair" is treated as a header. The market phase is kept
/// verbatim and the last signal is left empty for the reconciler to fill in.
pub fn parse(content: &str) -> Vec<SignalRecord> {
    let mut records = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_num = idx + 1;
        let line = match line_num {
            1 => raw.trim_start_matches('\u{feff}').trim(),
            _ => raw.trim(),
        };

        if line.is_empty() {
            continue;
        }

        if line_num == 1 && line.to_lowercase().contains("pair") {
            log::debug!("Skipping header line: {}", line);
            continue;
        }

        match parse_line(line, line_num) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("{}", e),
        }
    }

    records
}

/// Parse one trimmed, non-empty line
pub fn parse_line(line: &str, line_num: usize) -> Result<SignalRecord> {
    let caps = line_pattern()
        .captures(line)
        .ok_or_else(|| ReconcileError::MalformedRow {
            line: line_num,
            content: line.to_string(),
        })?;

    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str()).trim();

    Ok(SignalRecord::new(group(1), group(2), group(3), group(4)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted_and_unquoted_details() {
        let content = "\
EURUSD,Bullish,2024-01-02,\"strong momentum\"
GBPUSD,Bearish,2024-01-02,weak data
USDJPY,Neutral,2024-01-02,\"\"
";
        let records = parse(content);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].pair, "EURUSD");
        assert_eq!(records[0].market_phase, "Bullish");
        assert_eq!(records[0].date, "2024-01-02");
        assert_eq!(records[0].source_summary, "strong momentum");
        assert_eq!(records[0].last_signal, "");

        assert_eq!(records[1].source_summary, "weak data");
        assert_eq!(records[2].source_summary, "");
    }

    #[test]
    fn test_details_may_contain_commas() {
        let records = parse("EURUSD,Bullish,2024-01-02,\"ECB, Fed, and CPI\"\n");
        assert_eq!(records[0].source_summary, "ECB, Fed, and CPI");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let records = parse("  EUR USD , Bearish ,2024-01-02,\"padded \"  \n");
        assert_eq!(records[0].pair, "EUR USD");
        assert_eq!(records[0].market_phase, "Bearish");
        assert_eq!(records[0].source_summary, "padded");
    }

    #[test]
    fn test_header_on_first_line_is_skipped() {
        let content = "Pair,Sentiment,Date,Details\nEURUSD,Bullish,2024-01-02,x\n";
        let records = parse(content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pair, "EURUSD");
    }

    #[test]
    fn test_header_check_applies_to_first_physical_line_only() {
        // Line 1 is blank, so the "pair" line is treated as data
        let content = "\nPair,Sentiment,Date,Details\n";
        let records = parse(content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pair, "Pair");
    }

    #[test]
    fn test_leading_bom_is_stripped() {
        let records = parse("\u{feff}EURUSD,Bullish,2024-01-02,\"x\"\n");
        assert_eq!(records[0].pair, "EURUSD");
        assert_eq!(records[0].key(), "EURUSD");

        let with_header = parse("\u{feff}Pair,Sentiment,Date,Details\nGBPUSD,Bearish,2024-01-02,y\n");
        assert_eq!(with_header.len(), 1);
        assert_eq!(with_header[0].pair, "GBPUSD");
    }

    #[test]
    fn test_malformed_rows_are_dropped() {
        let content = "\
EURUSD,Bullish,2024-01-02,\"ok\"
garbage line
GBPUSD,Bearish
,Bearish,2024-01-02,empty pair
AUDUSD,Neutral,2024-01-02,\"fine\"
";
        let records = parse(content);
        let pairs: Vec<_> = records.iter().map(|r| r.pair.as_str()).collect();
        assert_eq!(pairs, vec!["EURUSD", "AUDUSD"]);
    }

    #[test]
    fn test_parse_line_reports_malformed_row() {
        match parse_line("only,three,fields", 7) {
            Err(ReconcileError::MalformedRow { line, content }) => {
                assert_eq!(line, 7);
                assert_eq!(content, "only,three,fields");
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_content() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n  \n").is_empty());
    }
}
