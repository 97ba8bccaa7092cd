//! HTTP interface
//!
//! Form-based login, session-gated report listing and creation, plus
//! health, metrics and OpenAPI endpoints.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod validated_form;

pub use router::{create_api_router, ApiDoc, AppState};
