//! Derived groupings over an instrument list.
//!
//! Each function re-scans the list it is given; results keep first-seen order.

use std::collections::HashSet;

use crate::domain::Instrument;

/// Distinct instrument types.
pub fn distinct_types(instruments: &[Instrument]) -> Vec<&str> {
    unique_in_order(
        instruments
            .iter()
            .map(|instrument| instrument.instrument_type.as_str()),
    )
}

/// Distinct listing countries among instruments of `instrument_type`.
pub fn countries_for_type<'a>(instruments: &'a [Instrument], instrument_type: &str) -> Vec<&'a str> {
    unique_in_order(
        instruments
            .iter()
            .filter(|instrument| instrument.instrument_type == instrument_type)
            .map(Instrument::country),
    )
}

/// Tickers of a (type, country) pair, joined by `,` or `, `.
///
/// Spaces inside a ticker become `-`, so `BRK A` is listed as `BRK-A`.
pub fn tickers_for_type_and_country(
    instruments: &[Instrument],
    instrument_type: &str,
    country: &str,
    with_spacing: bool,
) -> String {
    let separator = if with_spacing { ", " } else { "," };
    tickers_in_group(instruments, instrument_type, country)
        .map(normalize_ticker)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Raw tickers of a (type, country) pair, in input order.
pub fn tickers_in_group<'a>(
    instruments: &'a [Instrument],
    instrument_type: &'a str,
    country: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    instruments
        .iter()
        .filter(move |instrument| {
            instrument.instrument_type == instrument_type && instrument.country() == country
        })
        .map(|instrument| instrument.ticker.as_str())
}

pub fn normalize_ticker(ticker: &str) -> String {
    ticker.replace(' ', "-")
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|value| seen.insert(*value)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrument(ticker: &str, isin: &str, instrument_type: &str) -> Instrument {
        Instrument::new(ticker, "Name", "Long name", isin, instrument_type)
            .expect("valid instrument")
    }

    #[test]
    fn distinct_types_keep_first_seen_order() {
        let instruments = vec![
            instrument("SPY", "US78462F1030", "ETF"),
            instrument("AAPL", "US0378331005", "Stock"),
            instrument("QQQ", "US46090E1038", "ETF"),
        ];
        assert_eq!(distinct_types(&instruments), vec!["ETF", "Stock"]);
    }

    #[test]
    fn countries_are_filtered_by_type_and_deduplicated() {
        let instruments = vec![
            instrument("OTP", "HU0000061726", "Stock"),
            instrument("AAPL", "US0378331005", "Stock"),
            instrument("SPY", "US78462F1030", "ETF"),
            instrument("MOL", "HU0000153937", "Stock"),
            instrument("SAP", "DE0007164600", "Stock"),
        ];

        assert_eq!(countries_for_type(&instruments, "Stock"), vec!["HU", "US", "DE"]);
        assert_eq!(countries_for_type(&instruments, "ETF"), vec!["US"]);
        assert!(countries_for_type(&instruments, "Bond").is_empty());
    }

    #[test]
    fn tickers_are_normalized_and_joined() {
        let instruments = vec![
            instrument("BRK A", "US0846701086", "Stock"),
            instrument("BRK B", "US0846707026", "Stock"),
        ];

        assert_eq!(
            tickers_for_type_and_country(&instruments, "Stock", "US", true),
            "BRK-A, BRK-B"
        );
        assert_eq!(
            tickers_for_type_and_country(&instruments, "Stock", "US", false),
            "BRK-A,BRK-B"
        );
    }

    #[test]
    fn tickers_only_include_matching_type_and_country() {
        let instruments = vec![
            instrument("AAPL", "US0378331005", "Stock"),
            instrument("OTP", "HU0000061726", "Stock"),
            instrument("SPY", "US78462F1030", "ETF"),
            instrument("MSFT", "US5949181045", "Stock"),
        ];

        assert_eq!(
            tickers_for_type_and_country(&instruments, "Stock", "US", true),
            "AAPL, MSFT"
        );
        assert_eq!(
            tickers_for_type_and_country(&instruments, "Stock", "HU", true),
            "OTP"
        );
        assert_eq!(
            tickers_for_type_and_country(&instruments, "ETF", "HU", true),
            ""
        );
    }

    #[test]
    fn every_space_is_replaced() {
        assert_eq!(normalize_ticker("A B  C"), "A-B--C");
    }
}
