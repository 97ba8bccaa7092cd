//! # Periciales
//!
//! Expert report ("informe pericial") service with cookie sessions and
//! role-based access.
//!
//! ## Architecture
//!
//! - **domain**: users, roles, reports, repository interfaces and errors
//! - **application**: report use cases
//! - **auth**: login, server-side sessions and role checks
//! - **infrastructure**: SQLite persistence via SeaORM
//! - **api**: axum router, handlers and middleware
//! - **support**: process-level helpers (graceful shutdown)

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod support;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, run_migrations, DatabaseConfig};

pub use api::{create_api_router, AppState};
