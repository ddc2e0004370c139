use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 currency code as reported by the commerce platform (e.g. "USD", "CAD")
///
/// Stored uppercase. Only the shape is checked (three ASCII letters); the platform
/// is the authority on which codes exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Fallback used when neither the line, the order, nor configuration names a currency
    pub fn usd() -> Self {
        CurrencyCode("USD".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formats an amount held in minor units for display, e.g. `CAD 12.00`
    pub fn format_cents(&self, cents: i64) -> String {
        format!("{} {}", self, crate::core::money::format_cents(cents))
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::usd()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("Invalid currency: {}", s));
        }
        Ok(CurrencyCode(code.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}
