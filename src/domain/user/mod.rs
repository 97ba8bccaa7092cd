//! User aggregate
//!
//! Contains the User entity, its role, the creation DTO and the repository interface.

pub mod model;
pub mod repository;

mod dto_create;

pub use model::{Role, User};

pub use dto_create::CreateUserDto;

pub use repository::UserRepositoryInterface;
