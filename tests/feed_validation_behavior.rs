//! Behavior-driven tests for feed validation
//!
//! These tests verify HOW the validator treats the raw instrument feed,
//! focusing on fail-fast behavior and the errors a caller can inspect.

use serde_json::json;
use tickergen_core::{
    validate, CoreError, ErrorKind, Instrument, InstrumentError, InstrumentField, Isin,
};

fn row(ticker: &str, isin: &str, instrument_type: &str) -> serde_json::Value {
    json!([ticker, "Short name", "Long instrument name", isin, instrument_type])
}

// =============================================================================
// Validation: Well-formed feeds
// =============================================================================

#[test]
fn when_every_row_is_valid_all_instruments_are_returned_in_order() {
    // Given: A feed with mixed instrument types
    let body = json!({
        "data": [
            row("OTP", "HU0000061726", "Részvény"),
            row("SPY", "US78462F1030", "ETF"),
            row("MOL", "HU0000153937", "Részvény"),
            row("HUGOV30", "HU0000404090", "Kötvény")
        ]
    })
    .to_string();

    // When: The feed is validated
    let instruments = validate(&body).expect("valid feed");

    // Then: Nothing is dropped or reordered
    let tickers: Vec<&str> = instruments.iter().map(|i| i.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["OTP", "SPY", "MOL", "HUGOV30"]);
}

#[test]
fn when_feed_has_extra_top_level_fields_they_are_ignored() {
    let body = json!({
        "generated": "2026-10-14",
        "data": [row("SPY", "US78462F1030", "ETF")]
    })
    .to_string();

    assert_eq!(validate(&body).expect("valid feed").len(), 1);
}

// =============================================================================
// Validation: Fail-fast behavior
// =============================================================================

#[test]
fn when_one_row_among_many_is_invalid_no_instruments_are_produced() {
    // Given: Nine valid rows and one row with a 13 character ticker
    let mut rows: Vec<serde_json::Value> = (0..9)
        .map(|i| row(&format!("T{i}"), "US0378331005", "Részvény"))
        .collect();
    rows.insert(4, row("ABCDEFGHIJKLM", "US0378331005", "Részvény"));
    let body = json!({ "data": rows }).to_string();

    // When: The feed is validated
    let result = validate(&body);

    // Then: The whole feed is rejected with the offending ticker
    match result {
        Err(CoreError::Instrument(InstrumentError::InvalidField { field, value })) => {
            assert_eq!(field, InstrumentField::Ticker);
            assert_eq!(value, json!("ABCDEFGHIJKLM"));
        }
        other => panic!("expected invalid ticker, got {other:?}"),
    }
}

#[test]
fn when_a_row_has_several_problems_the_first_field_in_row_order_is_reported() {
    // Given: A row with a bad long name, ISIN and type
    let body = json!({
        "data": [["AAPL", "Apple", "A", "nope", "x".repeat(30)]]
    })
    .to_string();

    // When/Then: The long name is reported because it comes first
    let err = validate(&body).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "invalid instrument long name: \"A\"");
}

#[test]
fn when_the_document_is_not_json_a_parse_error_is_returned() {
    let err = validate("<html>maintenance</html>").expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn when_data_is_empty_the_feed_is_rejected_as_invalid_data() {
    let err = validate(r#"{"data": []}"#).expect_err("must fail");
    match err {
        CoreError::Instrument(error) => {
            assert_eq!(error.message(), "invalid data");
            assert_eq!(error.invalid_element(), &json!([]));
        }
        other => panic!("expected instrument error, got {other:?}"),
    }
}

#[test]
fn when_a_row_has_six_fields_it_is_rejected_as_an_invalid_row() {
    let body = json!({
        "data": [["AAPL", "Apple", "Apple Inc.", "US0378331005", "Részvény", "extra"]]
    })
    .to_string();

    let err = validate(&body).expect_err("must fail");
    assert!(err.to_string().starts_with("invalid instrument row"));
}

// =============================================================================
// Validation: ISIN matcher
// =============================================================================

#[test]
fn isin_matcher_accepts_reference_code_and_rejects_malformed_ones() {
    assert!(Isin::parse("US0378331005").is_ok());

    for bad in [
        "US037833100",   // too short
        "US03783310050", // too long
        "us0378331005",  // lowercase country
        "US037833100A",  // non-digit check character
        "1S0378331005",  // digit in country
    ] {
        assert!(Isin::parse(bad).is_err(), "{bad} should be rejected");
    }
}

#[test]
fn listing_country_is_taken_from_the_isin_prefix() {
    let instrument = Instrument::new("SAP", "SAP", "SAP SE", "DE0007164600", "Részvény")
        .expect("valid instrument");
    assert_eq!(instrument.country(), "DE");
}
