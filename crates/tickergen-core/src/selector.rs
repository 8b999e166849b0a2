use crate::domain::Instrument;

/// Instrument types published when no allow-list is configured.
pub const DEFAULT_INSTRUMENT_TYPES: [&str; 2] = ["Részvény", "ETF"];

/// Exact, case-sensitive set of instrument types to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAllowList(Vec<String>);

impl TypeAllowList {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(types.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, instrument_type: &str) -> bool {
        self.0.iter().any(|allowed| allowed == instrument_type)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn types(&self) -> &[String] {
        &self.0
    }

    /// Keep instruments whose type is allowed, preserving input order.
    pub fn select(&self, instruments: Vec<Instrument>) -> Vec<Instrument> {
        instruments
            .into_iter()
            .filter(|instrument| self.contains(&instrument.instrument_type))
            .collect()
    }
}

impl Default for TypeAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_INSTRUMENT_TYPES)
    }
}
