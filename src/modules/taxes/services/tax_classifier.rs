//! Tax line title → `TaxCategory`
//!
//! Exact titles first, then uppercase substring rules in a fixed priority order,
//! then `Other`. The order of the substring rules decides overlapping titles:
//! "Provincial GST" is GST because the GST rule runs before the PST rule.

use crate::modules::taxes::models::TaxCategory;

/// Titles the platform sends verbatim. Case sensitive.
pub const EXACT_TITLES: &[(&str, TaxCategory)] = &[
    ("GST", TaxCategory::Gst),
    ("HST", TaxCategory::Hst),
    ("PST", TaxCategory::Pst),
    ("QST", TaxCategory::Qst),
    ("Quebec Sales Tax", TaxCategory::Qst),
    ("Goods and Services Tax", TaxCategory::Gst),
    ("Harmonized Sales Tax", TaxCategory::Hst),
    ("Provincial Sales Tax", TaxCategory::Pst),
    ("Sales Tax", TaxCategory::State),
    ("State Tax", TaxCategory::State),
    ("Local Tax", TaxCategory::Local),
    ("City Tax", TaxCategory::Local),
    ("County Tax", TaxCategory::Local),
    ("VAT", TaxCategory::Other),
    ("Value Added Tax", TaxCategory::Other),
    ("Customs", TaxCategory::Other),
    ("Import Tax", TaxCategory::Other),
    ("Duty", TaxCategory::Other),
];

/// Something that can sort a tax line title into the taxonomy
///
/// Implementations must be total: every title maps to a category.
pub trait Classifier: Send + Sync {
    fn classify(&self, title: &str) -> TaxCategory;
}

/// The built-in title classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleClassifier;

impl TitleClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for TitleClassifier {
    fn classify(&self, title: &str) -> TaxCategory {
        classify(title)
    }
}

/// Classify a free-text tax title
pub fn classify(title: &str) -> TaxCategory {
    exact_match(title).unwrap_or_else(|| heuristic_match(title))
}

fn exact_match(title: &str) -> Option<TaxCategory> {
    EXACT_TITLES
        .iter()
        .find(|(known, _)| *known == title)
        .map(|(_, category)| *category)
}

// The VAT rule and the fallback both yield Other.
#[allow(clippy::if_same_then_else)]
fn heuristic_match(title: &str) -> TaxCategory {
    let t = title.to_uppercase();
    let has = |needle: &str| t.contains(needle);

    if has("GST") || (has("GOODS") && has("SERVICE")) {
        TaxCategory::Gst
    } else if has("PST") || has("PROVINCIAL") {
        TaxCategory::Pst
    } else if has("HST") || has("HARMONIZED") {
        TaxCategory::Hst
    } else if has("QST") || has("QUEBEC") {
        TaxCategory::Qst
    } else if has("STATE") || has("SALES TAX") {
        TaxCategory::State
    } else if has("LOCAL") || has("CITY") || has("COUNTY") {
        TaxCategory::Local
    } else if has("VAT") || has("VALUE ADDED") {
        TaxCategory::Other
    } else {
        TaxCategory::Other
    }
}
