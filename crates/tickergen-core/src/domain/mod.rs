//! # Domain Models
//!
//! Instrument records built from the positional rows of the feed.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Instrument`] | Validated feed row |
//! | [`Isin`] | ISIN code with derived listing country |
//!
//! Construction validates every field, so a value of either type always
//! satisfies the feed's shape contract.

mod instrument;
mod isin;

pub use instrument::Instrument;
pub use isin::Isin;
