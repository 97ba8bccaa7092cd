//! Application services

pub mod report;

pub use report::ReportService;
