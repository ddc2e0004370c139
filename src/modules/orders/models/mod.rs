pub mod order_payload;
pub mod order_tax_record;

pub use order_payload::{MoneyBag, OrderPayload, OrderTaxLine, PriceSet};
pub use order_tax_record::OrderTaxRecord;
