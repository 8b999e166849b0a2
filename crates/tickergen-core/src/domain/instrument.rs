use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Isin;
use crate::error::{InstrumentError, InstrumentField};

/// Tradable security as described by one feed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub ticker: String,
    pub short_name: String,
    pub long_name: String,
    pub isin_code: Isin,
    #[serde(rename = "type")]
    pub instrument_type: String,
}

impl Instrument {
    pub fn new(
        ticker: impl Into<String>,
        short_name: impl Into<String>,
        long_name: impl Into<String>,
        isin_code: impl Into<String>,
        instrument_type: impl Into<String>,
    ) -> Result<Self, InstrumentError> {
        Self::from_row(&[
            Value::String(ticker.into()),
            Value::String(short_name.into()),
            Value::String(long_name.into()),
            Value::String(isin_code.into()),
            Value::String(instrument_type.into()),
        ])
    }

    /// Build an instrument from a positional row
    /// `[ticker, shortName, longName, isinCode, type]`.
    ///
    /// Fields are checked in row order and the first violation is returned.
    pub fn from_row(row: &[Value]) -> Result<Self, InstrumentError> {
        if row.len() != InstrumentField::ALL.len() {
            return Err(InstrumentError::InvalidRow {
                value: Value::Array(row.to_vec()),
            });
        }

        let ticker = bounded_text(row, InstrumentField::Ticker)?;
        let short_name = bounded_text(row, InstrumentField::ShortName)?;
        let long_name = bounded_text(row, InstrumentField::LongName)?;

        let raw_isin = &row[InstrumentField::IsinCode.position()];
        let isin_code = raw_isin
            .as_str()
            .and_then(|code| Isin::parse(code).ok())
            .ok_or_else(|| InstrumentError::field(InstrumentField::IsinCode, raw_isin))?;

        let instrument_type = bounded_text(row, InstrumentField::Type)?;

        Ok(Self {
            ticker: ticker.to_owned(),
            short_name: short_name.to_owned(),
            long_name: long_name.to_owned(),
            isin_code,
            instrument_type: instrument_type.to_owned(),
        })
    }

    /// Listing country, the ISIN prefix.
    pub fn country(&self) -> &str {
        self.isin_code.country_code()
    }
}

fn length_bounds(field: InstrumentField) -> RangeInclusive<usize> {
    match field {
        InstrumentField::Ticker => 1..=12,
        InstrumentField::ShortName => 2..=24,
        InstrumentField::LongName => 2..=64,
        InstrumentField::IsinCode => 12..=12,
        InstrumentField::Type => 0..=24,
    }
}

fn bounded_text(row: &[Value], field: InstrumentField) -> Result<&str, InstrumentError> {
    let value = &row[field.position()];
    value
        .as_str()
        .filter(|text| length_bounds(field).contains(&text.chars().count()))
        .ok_or_else(|| InstrumentError::field(field, value))
}
