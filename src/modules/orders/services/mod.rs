pub mod order_tax_service;

pub use order_tax_service::OrderTaxService;
