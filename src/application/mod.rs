pub mod services;

pub use services::ReportService;
