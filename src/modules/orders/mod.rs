pub mod models;
pub mod services;

pub use models::{OrderPayload, OrderTaxRecord};
pub use services::OrderTaxService;
