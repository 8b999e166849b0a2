use std::fmt::{Display, Formatter};

use serde_json::Value;
use thiserror::Error;

use crate::http_client::HttpError;

/// Positional fields of a feed row, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentField {
    Ticker,
    ShortName,
    LongName,
    IsinCode,
    Type,
}

impl InstrumentField {
    /// Row order of the feed, which is also the order fields are checked in.
    pub const ALL: [Self; 5] = [
        Self::Ticker,
        Self::ShortName,
        Self::LongName,
        Self::IsinCode,
        Self::Type,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ticker => "ticker",
            Self::ShortName => "short name",
            Self::LongName => "long name",
            Self::IsinCode => "ISIN code",
            Self::Type => "type",
        }
    }

    pub const fn position(self) -> usize {
        match self {
            Self::Ticker => 0,
            Self::ShortName => 1,
            Self::LongName => 2,
            Self::IsinCode => 3,
            Self::Type => 4,
        }
    }
}

impl Display for InstrumentField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Structural or field-level violation in the instrument feed.
///
/// Every variant carries the offending JSON value as it appeared in the feed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InstrumentError {
    #[error("invalid data: {value}")]
    InvalidData { value: Value },

    #[error("invalid instrument row: {value}")]
    InvalidRow { value: Value },

    #[error("invalid instrument {field}: {value}")]
    InvalidField { field: InstrumentField, value: Value },
}

impl InstrumentError {
    pub fn field(field: InstrumentField, value: &Value) -> Self {
        Self::InvalidField {
            field,
            value: value.clone(),
        }
    }

    /// Message without the offending value, e.g. `invalid instrument ticker`.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidData { .. } => String::from("invalid data"),
            Self::InvalidRow { .. } => String::from("invalid instrument row"),
            Self::InvalidField { field, .. } => format!("invalid instrument {field}"),
        }
    }

    pub fn invalid_element(&self) -> &Value {
        match self {
            Self::InvalidData { value }
            | Self::InvalidRow { value }
            | Self::InvalidField { value, .. } => value,
        }
    }
}

/// ISIN code that does not match `[A-Z]{2}[A-Z0-9]{9}[0-9]`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("ISIN code must be 2 uppercase letters, 9 alphanumerics and a check digit: '{value}'")]
pub struct IsinError {
    pub value: String,
}

/// Failure retrieving the raw feed body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Transport(#[from] HttpError),

    #[error("got non 200 response, status code: {status}")]
    UnexpectedStatus { status: u16 },

    #[error("failed to read feed file '{path}': {message}")]
    File { path: String, message: String },
}

/// Failure handing the rendered document to the object store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("upload of '{key}' failed: {source}")]
    Transport { key: String, source: HttpError },

    #[error("upload of '{key}' rejected with status {status}")]
    Rejected { key: String, status: u16 },

    #[error("failed to write '{path}': {message}")]
    Io { path: String, message: String },
}

/// Coarse classification of a [`CoreError`], checked at stage boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Validation,
    EmptyResult,
    Feed,
    Publish,
}

/// Top-level error type for pipeline operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("feed parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error("HTML renderer got 0 instruments")]
    EmptyResult,

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl CoreError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::Instrument(_) => ErrorKind::Validation,
            Self::EmptyResult => ErrorKind::EmptyResult,
            Self::Feed(_) => ErrorKind::Feed,
            Self::Publish(_) => ErrorKind::Publish,
        }
    }
}
