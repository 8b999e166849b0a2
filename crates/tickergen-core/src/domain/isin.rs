use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::IsinError;

static ISIN_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{2})[A-Z0-9]{9}[0-9]$").expect("ISIN pattern must compile")
});

/// International Securities Identification Number.
///
/// The first two letters name the issuing country; that prefix is the
/// instrument's listing country everywhere in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isin(String);

impl Isin {
    /// Parse an ISIN. The whole input must match, no trimming is applied.
    pub fn parse(input: &str) -> Result<Self, IsinError> {
        if !ISIN_CODE.is_match(input) {
            return Err(IsinError {
                value: input.to_owned(),
            });
        }

        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Two-letter country prefix.
    pub fn country_code(&self) -> &str {
        // Pattern guarantees two leading ASCII letters.
        &self.0[..2]
    }
}

impl Display for Isin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Isin {
    type Error = IsinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Isin {
    type Error = IsinError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Isin> for String {
    fn from(value: Isin) -> Self {
        value.0
    }
}
