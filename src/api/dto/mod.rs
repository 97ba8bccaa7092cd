pub mod auth;
pub mod common;
pub mod report;

pub use auth::{LoginRequest, LoginResponse, UserInfo};
pub use common::ApiResponse;
pub use report::{CreateReportRequest, ReportDto};
