//! Database repository implementations
//!
//! One SeaORM repository per aggregate. Rows are mapped to domain types here
//! and never leave this module as entity models.

pub mod report_repository;
pub mod user_repository;

pub use report_repository::SeaOrmReportRepository;
pub use user_repository::SeaOrmUserRepository;

use tracing::error;

use crate::domain::DomainError;

fn db_err(e: sea_orm::DbErr) -> DomainError {
    error!("Database error: {}", e);
    DomainError::Storage(e.to_string())
}
