pub mod set_aside_report;

pub use set_aside_report::{CategoryTotal, JurisdictionTotal, SetAsideReport};
