use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::CurrencyCode;

/// One tax entry on an order, as supplied by the commerce platform
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
    /// Free-text label, e.g. "GST", "CA State Tax"
    #[serde(default)]
    pub title: String,

    /// Amount in major units as the platform sent it, e.g. "8.25"
    ///
    /// Kept raw; unreadable values count as zero when aggregated.
    #[serde(default)]
    pub amount: Option<String>,

    /// Rate as a fraction (0.0825 for 8.25%)
    #[serde(default)]
    pub rate: Option<Decimal>,

    /// Currency of `amount`; the order currency applies when absent
    #[serde(default)]
    pub currency_code: Option<CurrencyCode>,
}

impl TaxLine {
    pub fn new(title: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            amount: Some(amount.into()),
            rate: None,
            currency_code: None,
        }
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn with_currency(mut self, currency_code: CurrencyCode) -> Self {
        self.currency_code = Some(currency_code);
        self
    }
}

/// A billing or shipping address, reduced to the fields that decide jurisdiction
///
/// Accepts both the platform's snake_case names (`country_code`, `zip`) and
/// camelCase ones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddressCandidate {
    #[serde(default)]
    pub country: Option<String>,

    #[serde(default, alias = "countryCode")]
    pub country_code: Option<String>,

    #[serde(default, alias = "state")]
    pub province: Option<String>,

    #[serde(default, alias = "provinceCode", alias = "state_code", alias = "stateCode")]
    pub province_code: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default, alias = "postalCode", alias = "zip")]
    pub postal_code: Option<String>,
}

/// Where the tax was collected; one value per order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jurisdiction {
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

impl Jurisdiction {
    /// Derive the order jurisdiction from its address candidates
    ///
    /// Billing wins whenever it is present at all; shipping is only consulted when
    /// there is no billing address. Fields are never blended across the two.
    /// Codes are preferred over full names.
    pub fn from_addresses(
        billing: Option<&AddressCandidate>,
        shipping: Option<&AddressCandidate>,
    ) -> Self {
        match billing.or(shipping) {
            Some(address) => Self::from_address(address),
            None => Self::default(),
        }
    }

    pub fn from_address(address: &AddressCandidate) -> Self {
        Self {
            country: prefer(&address.country_code, &address.country),
            province: prefer(&address.province_code, &address.province),
            city: address.city.clone(),
            postal_code: address.postal_code.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.province.is_none()
            && self.city.is_none()
            && self.postal_code.is_none()
    }
}

// Blank strings count as missing when choosing between code and name.
fn prefer(primary: &Option<String>, fallback: &Option<String>) -> Option<String> {
    primary
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| fallback.as_deref().filter(|s| !s.trim().is_empty()))
        .map(str::to_string)
}
