//! Parse and validate the raw instrument feed.
//!
//! The feed is `{"data": [[ticker, shortName, longName, isinCode, type], ...]}`.
//! Validation is all-or-nothing: the first bad row aborts the whole feed.

use serde_json::Value;

use crate::domain::Instrument;
use crate::error::{CoreError, InstrumentError};

/// Parse a feed body and validate every row.
pub fn validate(body: &str) -> Result<Vec<Instrument>, CoreError> {
    let payload: Value = serde_json::from_str(body)?;
    Ok(validate_payload(&payload)?)
}

/// Validate an already-parsed feed document.
pub fn validate_payload(payload: &Value) -> Result<Vec<Instrument>, InstrumentError> {
    let data = payload.get("data").unwrap_or(&Value::Null);

    let rows = match data.as_array() {
        Some(rows) if !rows.is_empty() => rows,
        _ => {
            return Err(InstrumentError::InvalidData {
                value: data.clone(),
            })
        }
    };

    rows.iter().map(validate_row).collect()
}

fn validate_row(row: &Value) -> Result<Instrument, InstrumentError> {
    match row.as_array() {
        Some(fields) => Instrument::from_row(fields),
        None => Err(InstrumentError::InvalidRow { value: row.clone() }),
    }
}
