use serde::Serialize;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::classifier::{
    countries_for_type, distinct_types, normalize_ticker, tickers_for_type_and_country,
    tickers_in_group,
};
use crate::domain::Instrument;
use crate::error::CoreError;

pub const DEFAULT_SCREENER_URL: &str = "https://finviz.com/screener.ashx?v=111&t=";

/// Static page settings passed through to the template unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    /// Prefix the compact ticker list is appended to.
    pub screener_url: String,
    pub analytics_id: Option<String>,
}

impl PageConfig {
    pub fn new(screener_url: impl Into<String>, analytics_id: Option<String>) -> Self {
        Self {
            screener_url: screener_url.into(),
            analytics_id,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SCREENER_URL, None)
    }
}

/// Tickers listed in one country for one instrument type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryTable {
    pub country: String,
    /// Display form, `BRK-A, BRK-B`.
    pub tickers: String,
    pub screener_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSection {
    pub instrument_type: String,
    pub countries: Vec<CountryTable>,
}

/// Everything the HTML stage needs; holds no further derivation logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub generation_date: String,
    pub sections: Vec<TypeSection>,
    pub screener_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_id: Option<String>,
}

impl ViewModel {
    pub fn instrument_types(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .map(|section| section.instrument_type.as_str())
    }

    pub fn table_count(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.countries.len())
            .sum()
    }
}

/// Assemble the view model, stamped with today's UTC date.
pub fn build_view_model(
    instruments: &[Instrument],
    config: &PageConfig,
) -> Result<ViewModel, CoreError> {
    build_view_model_at(instruments, config, OffsetDateTime::now_utc())
}

/// Assemble the view model for a fixed generation time.
///
/// Fails with [`CoreError::EmptyResult`] before any grouping when
/// `instruments` is empty.
pub fn build_view_model_at(
    instruments: &[Instrument],
    config: &PageConfig,
    generated_at: OffsetDateTime,
) -> Result<ViewModel, CoreError> {
    if instruments.is_empty() {
        return Err(CoreError::EmptyResult);
    }

    let sections = distinct_types(instruments)
        .into_iter()
        .map(|instrument_type| TypeSection {
            instrument_type: instrument_type.to_owned(),
            countries: countries_for_type(instruments, instrument_type)
                .into_iter()
                .map(|country| CountryTable {
                    country: country.to_owned(),
                    tickers: tickers_for_type_and_country(
                        instruments,
                        instrument_type,
                        country,
                        true,
                    ),
                    screener_link: screener_link(
                        &config.screener_url,
                        instruments,
                        instrument_type,
                        country,
                    ),
                })
                .collect(),
        })
        .collect();

    Ok(ViewModel {
        generation_date: format_generation_date(generated_at.date()),
        sections,
        screener_url: config.screener_url.clone(),
        analytics_id: config.analytics_id.clone(),
    })
}

/// Short month, unpadded day and year, e.g. `Oct 4, 2026`.
pub fn format_generation_date(date: Date) -> String {
    date.format(format_description!(
        "[month repr:short] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| date.to_string())
}

fn screener_link(
    screener_url: &str,
    instruments: &[Instrument],
    instrument_type: &str,
    country: &str,
) -> String {
    let tickers = tickers_in_group(instruments, instrument_type, country)
        .map(|ticker| urlencoding::encode(&normalize_ticker(ticker)).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    format!("{screener_url}{tickers}")
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn instrument(ticker: &str, isin: &str, instrument_type: &str) -> Instrument {
        Instrument::new(ticker, "Name", "Long name", isin, instrument_type)
            .expect("valid instrument")
    }

    #[test]
    fn empty_input_fails_before_grouping() {
        let err = build_view_model(&[], &PageConfig::default()).expect_err("must fail");
        assert!(matches!(err, CoreError::EmptyResult));
        assert_eq!(err.to_string(), "HTML renderer got 0 instruments");
    }

    #[test]
    fn groups_by_type_then_country() {
        let instruments = vec![
            instrument("OTP", "HU0000061726", "Részvény"),
            instrument("SPY", "US78462F1030", "ETF"),
            instrument("BRK B", "US0846707026", "Részvény"),
            instrument("AAPL", "US0378331005", "Részvény"),
        ];

        let view = build_view_model_at(
            &instruments,
            &PageConfig::new("https://screener.test/?t=", Some(String::from("UA-1-1"))),
            datetime!(2026-10-04 23:59 UTC),
        )
        .expect("view model");

        assert_eq!(view.generation_date, "Oct 4, 2026");
        assert_eq!(
            view.instrument_types().collect::<Vec<_>>(),
            vec!["Részvény", "ETF"]
        );
        assert_eq!(view.table_count(), 3);

        let stocks = &view.sections[0];
        assert_eq!(stocks.countries[0].country, "HU");
        assert_eq!(stocks.countries[0].tickers, "OTP");
        assert_eq!(stocks.countries[1].country, "US");
        assert_eq!(stocks.countries[1].tickers, "BRK-B, AAPL");
        assert_eq!(
            stocks.countries[1].screener_link,
            "https://screener.test/?t=BRK-B,AAPL"
        );

        assert_eq!(view.screener_url, "https://screener.test/?t=");
        assert_eq!(view.analytics_id.as_deref(), Some("UA-1-1"));
    }

    #[test]
    fn screener_link_encodes_unsafe_ticker_characters() {
        let instruments = vec![instrument("M&M", "US0000000001", "ETF")];
        let view = build_view_model_at(
            &instruments,
            &PageConfig::default(),
            datetime!(2026-01-15 08:00 UTC),
        )
        .expect("view model");

        assert_eq!(view.sections[0].countries[0].tickers, "M&M");
        assert_eq!(
            view.sections[0].countries[0].screener_link,
            format!("{DEFAULT_SCREENER_URL}M%26M")
        );
        assert_eq!(view.generation_date, "Jan 15, 2026");
    }
}
