//! History reconciliation
//!
//! The newest snapshot usually states only today's phase. The previous
//! snapshot's resolved signal is carried forward as each pair's last signal,
//! so a transition such as "Bullish today, Sell Signal yesterday" is visible
//! at a glance.

use crate::types::{SignalRecord, NO_HISTORY};
use std::collections::HashMap;

/// Fill in the last signal of every current record from the previous snapshot
///
/// Without a previous snapshot the records are returned unchanged. Otherwise
/// every record gets the previous snapshot's signal for its normalized pair,
/// or "N/A" when the pair did not appear there. Length and order are kept.
pub fn reconcile(
    current: Vec<SignalRecord>,
    previous: Option<&[SignalRecord]>,
) -> Vec<SignalRecord> {
    let Some(previous) = previous else {
        log::debug!("No previous snapshot, keeping last signals as parsed");
        return current;
    };

    let history = build_history(previous);
    log::debug!("History lookup holds {} pair(s)", history.len());

    current
        .into_iter()
        .map(|record| {
            let last_signal = match history.get(&record.key()) {
                Some(signal) => signal.clone(),
                None => NO_HISTORY.to_string(),
            };
            log::trace!("{} -> last signal {:?}", record.pair, last_signal);
            record.with_last_signal(last_signal)
        })
        .collect()
}

/// Build the normalized pair key → signal string lookup
///
/// When a pair occurs more than once, the last occurrence wins.
pub fn build_history(previous: &[SignalRecord]) -> HashMap<String, String> {
    previous
        .iter()
        .map(|record| (record.key(), record.history_signal()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pair: &str, phase: &str, last: &str) -> SignalRecord {
        SignalRecord::new(pair, phase, "2024-01-02", "").with_last_signal(last)
    }

    #[test]
    fn test_no_previous_leaves_records_unchanged() {
        let current = vec![
            record("EURUSD", "Bullish", "Sell Signal"),
            record("GBPUSD", "Neutral", ""),
        ];
        let result = reconcile(current.clone(), None);
        assert_eq!(result, current);
    }

    #[test]
    fn test_bullish_previous_gives_buy_signal_across_formatting() {
        let previous = vec![record("EURUSD", "Bullish", "")];
        let current = vec![
            record("eur usd", "Bearish", ""),
            record(" EURUSD ", "Neutral", ""),
        ];

        let result = reconcile(current, Some(previous.as_slice()));
        assert_eq!(result[0].last_signal, "Buy Signal");
        assert_eq!(result[1].last_signal, "Buy Signal");
    }

    #[test]
    fn test_signal_derivation_from_previous() {
        let previous = vec![
            record("EURUSD", "Bearish", "Buy Signal"),
            record("GBPUSD", "Neutral", "Buy Signal"),
            record("USDJPY", "Sideways", ""),
        ];
        let current = vec![
            record("EURUSD", "Bullish", ""),
            record("GBPUSD", "Bullish", ""),
            record("USDJPY", "Bullish", ""),
        ];

        let result = reconcile(current, Some(previous.as_slice()));
        assert_eq!(result[0].last_signal, "Sell Signal");
        assert_eq!(result[1].last_signal, "Buy Signal");
        assert_eq!(result[2].last_signal, "Neutral Signal");
    }

    #[test]
    fn test_missing_pair_gets_na() {
        let previous = vec![record("EURUSD", "Bullish", "")];
        let current = vec![record("AUDUSD", "Bearish", "Buy Signal")];

        let result = reconcile(current, Some(previous.as_slice()));
        assert_eq!(result[0].last_signal, "N/A");
    }

    #[test]
    fn test_empty_previous_marks_everything_na() {
        let current = vec![record("EURUSD", "Bullish", "Buy Signal")];
        let result = reconcile(current, Some(&[][..]));
        assert_eq!(result[0].last_signal, "N/A");
    }

    #[test]
    fn test_duplicate_previous_pairs_last_wins() {
        let previous = vec![
            record("EURUSD", "Bullish", ""),
            record("EUR USD", "Bearish", ""),
        ];
        let history = build_history(&previous);
        assert_eq!(history.len(), 1);
        assert_eq!(history["EURUSD"], "Sell Signal");
    }

    #[test]
    fn test_order_and_other_fields_preserved() {
        let previous = vec![record("GBPUSD", "Bearish", "")];
        let current = vec![
            SignalRecord::new("USDCHF", "Neutral", "2024-02-01", "flat"),
            SignalRecord::new("GBPUSD", "Bullish", "2024-02-01", "breakout"),
        ];

        let result = reconcile(current, Some(previous.as_slice()));
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].pair, "USDCHF");
        assert_eq!(result[0].source_summary, "flat");
        assert_eq!(result[1].pair, "GBPUSD");
        assert_eq!(result[1].market_phase, "Bullish");
        assert_eq!(result[1].date, "2024-02-01");
        assert_eq!(result[1].last_signal, "Sell Signal");
    }
}
