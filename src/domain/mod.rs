//! Domain layer: entities, DTOs, repository interfaces and errors.

pub mod error;
pub mod report;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use report::{CreateReportDto, NewReport, Report, ReportRepositoryInterface};
pub use user::{CreateUserDto, Role, User, UserRepositoryInterface};
