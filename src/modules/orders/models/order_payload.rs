// Order payload as delivered by the commerce platform (webhook body or REST export).
//
// Ids, prices, rates and totals may arrive as strings or numbers; values of any
// other type decode as absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::money::{amount_to_cents, parse_amount};
use crate::core::{CurrencyCode, Result};
use crate::modules::taxes::models::{AddressCandidate, TaxLine};

/// One order, reduced to what the tax breakdown needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPayload {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Order currency (ISO code)
    #[serde(default)]
    pub currency: Option<String>,

    /// RFC 3339 creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,

    /// Total tax the platform reports for the order, in major units
    #[serde(default, deserialize_with = "string_or_number")]
    pub total_tax: Option<String>,

    #[serde(default)]
    pub tax_lines: Vec<OrderTaxLine>,

    #[serde(default)]
    pub billing_address: Option<AddressCandidate>,

    #[serde(default)]
    pub shipping_address: Option<AddressCandidate>,
}

/// Tax line as the platform sends it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderTaxLine {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub price: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub rate: Option<String>,

    #[serde(default)]
    pub price_set: Option<PriceSet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceSet {
    #[serde(default)]
    pub shop_money: Option<MoneyBag>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoneyBag {
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: Option<String>,

    #[serde(default)]
    pub currency_code: Option<String>,
}

impl OrderPayload {
    /// Decode a single order object
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Decode an order document that may hold one order or many
    ///
    /// Accepts a bare order object, an array of orders, `{"order": {...}}`, or
    /// `{"orders": [...]}`.
    pub fn many_from_json(input: &str) -> Result<Vec<Self>> {
        let document: Value = serde_json::from_str(input)?;

        let items = match document {
            Value::Array(items) => items,
            Value::Object(mut map) => {
                if let Some(Value::Array(items)) = map.remove("orders") {
                    items
                } else if let Some(order @ Value::Object(_)) = map.remove("order") {
                    vec![order]
                } else {
                    vec![Value::Object(map)]
                }
            }
            other => vec![other],
        };

        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(Into::into))
            .collect()
    }

    /// Identifier used in logs and reports; falls back to the order name
    pub fn order_id(&self) -> String {
        self.id
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Order currency, if the platform sent a well-formed one
    pub fn currency_code(&self) -> Option<CurrencyCode> {
        self.currency.as_deref().and_then(|c| c.parse().ok())
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Reported total tax in cents; missing or unreadable totals count as zero
    pub fn expected_total_cents(&self) -> i64 {
        amount_to_cents(self.total_tax.as_deref())
    }

    /// Tax lines in the shape the aggregator consumes
    pub fn tax_lines(&self) -> Vec<TaxLine> {
        self.tax_lines.iter().map(OrderTaxLine::to_tax_line).collect()
    }
}

impl OrderTaxLine {
    fn shop_money(&self) -> Option<&MoneyBag> {
        self.price_set.as_ref().and_then(|p| p.shop_money.as_ref())
    }

    pub fn to_tax_line(&self) -> TaxLine {
        TaxLine {
            title: self.title.clone().unwrap_or_default(),
            amount: self
                .price
                .clone()
                .or_else(|| self.shop_money().and_then(|m| m.amount.clone())),
            rate: self.rate.as_deref().and_then(parse_amount),
            currency_code: self
                .shop_money()
                .and_then(|m| m.currency_code.as_deref())
                .and_then(|c| c.parse().ok()),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
