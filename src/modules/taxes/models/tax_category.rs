use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed tax taxonomy every tax line is sorted into
///
/// Closed set: unrecognized titles land in `Other`, so nothing is ever dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxCategory {
    /// Canadian federal Goods and Services Tax
    Gst,
    /// Canadian Provincial Sales Tax
    Pst,
    /// Canadian Harmonized Sales Tax
    Hst,
    /// Quebec Sales Tax
    Qst,
    /// US state-level sales tax
    State,
    /// City / county / other local taxes
    Local,
    /// VAT, duties, and anything unrecognized
    Other,
}

impl TaxCategory {
    pub const ALL: [TaxCategory; 7] = [
        TaxCategory::Gst,
        TaxCategory::Pst,
        TaxCategory::Hst,
        TaxCategory::Qst,
        TaxCategory::State,
        TaxCategory::Local,
        TaxCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxCategory::Gst => "gst",
            TaxCategory::Pst => "pst",
            TaxCategory::Hst => "hst",
            TaxCategory::Qst => "qst",
            TaxCategory::State => "state",
            TaxCategory::Local => "local",
            TaxCategory::Other => "other",
        }
    }
}

impl fmt::Display for TaxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaxCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaxCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid tax category: {}", s))
    }
}
