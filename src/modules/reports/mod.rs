pub mod models;
pub mod services;

pub use models::SetAsideReport;
pub use services::ReportService;
