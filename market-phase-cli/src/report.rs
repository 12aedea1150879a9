//! Terminal table of loaded signals
//!
//! Badges are a pure projection of the classifications the library exposes.

use market_phase_reconciler::{MarketPhase, SignalRecord};

const SUMMARY_WIDTH: usize = 60;

/// Badge for the current market phase
pub fn phase_badge(record: &SignalRecord) -> &'static str {
    match record.phase() {
        MarketPhase::Bullish => "BUY",
        MarketPhase::Bearish => "SELL",
        MarketPhase::Neutral => "NEUTRAL",
    }
}

/// Badge for the carried-forward last signal
pub fn last_signal_badge(last_signal: &str) -> String {
    if last_signal.is_empty() {
        String::new()
    } else if last_signal.eq_ignore_ascii_case("Buy Signal") {
        "▲ BUY".to_string()
    } else if last_signal.eq_ignore_ascii_case("Sell Signal") {
        "▼ SELL".to_string()
    } else {
        format!("▶ {}", last_signal.to_uppercase().replace(" SIGNAL", ""))
    }
}

/// Render records as an aligned text table
pub fn render_table(records: &[SignalRecord]) -> String {
    let header = ["Pair", "Phase", "Last Signal", "Summary"];
    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|r| {
            [
                r.pair.clone(),
                phase_badge(r).to_string(),
                last_signal_badge(&r.last_signal),
                truncate(&r.source_summary, SUMMARY_WIDTH),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    out.push_str(rule.join("─┼─").trim_end());
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - cell.chars().count();
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" │ ").trim_end());
    out.push('\n');
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max - 1).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_badge() {
        let rec = |phase: &str| SignalRecord::new("EURUSD", phase, "", "");
        assert_eq!(phase_badge(&rec("bullish")), "BUY");
        assert_eq!(phase_badge(&rec("Bearish")), "SELL");
        assert_eq!(phase_badge(&rec("Neutral")), "NEUTRAL");
        assert_eq!(phase_badge(&rec("")), "NEUTRAL");
    }

    #[test]
    fn test_last_signal_badge() {
        assert_eq!(last_signal_badge("Buy Signal"), "▲ BUY");
        assert_eq!(last_signal_badge("sell signal"), "▼ SELL");
        assert_eq!(last_signal_badge("Neutral Signal"), "▶ NEUTRAL");
        assert_eq!(last_signal_badge("N/A"), "▶ N/A");
        assert_eq!(last_signal_badge(""), "");
    }

    #[test]
    fn test_render_table() {
        let records = vec![
            SignalRecord::new("EURUSD", "Bullish", "2024-01-02", "strong momentum")
                .with_last_signal("Sell Signal"),
            SignalRecord::new("GBP/USD", "Neutral", "2024-01-02", "")
                .with_last_signal("N/A"),
        ];

        let table = render_table(&records);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Pair    │ Phase   │ Last Signal │ Summary");
        assert!(lines[1].starts_with("────────┼─"));
        assert_eq!(lines[2], "EURUSD  │ BUY     │ ▼ SELL      │ strong momentum");
        assert_eq!(lines[3], "GBP/USD │ NEUTRAL │ ▶ N/A       │");
    }

    #[test]
    fn test_long_summary_is_truncated() {
        let long = "x".repeat(100);
        let out = truncate(&long, 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with('…'));
        assert_eq!(truncate("short", 10), "short");
    }
}
