//! Report aggregate

pub mod model;
pub mod repository;

mod dto_create;

pub use model::{NewReport, Report};

pub use dto_create::{CreateReportDto, DATE_FORMAT};

pub use repository::ReportRepositoryInterface;
