pub mod tax_breakdown;
pub mod tax_category;
pub mod tax_line;

pub use tax_breakdown::{DetailedTaxLine, TaxBreakdown, ValidationResult};
pub use tax_category::TaxCategory;
pub use tax_line::{AddressCandidate, Jurisdiction, TaxLine};
