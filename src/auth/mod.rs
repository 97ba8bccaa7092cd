//! Authentication and authorization
//!
//! Cookie-carried, server-side sessions plus role checks.

pub mod service;
pub mod session;

pub use service::{require_role, AuthService, LoginOutcome};
pub use session::{Session, SessionConfig, SessionManager, SESSION_COOKIE};
