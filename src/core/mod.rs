pub mod currency;
pub mod error;
pub mod money;

pub use currency::CurrencyCode;
pub use error::{AppError, Result};
