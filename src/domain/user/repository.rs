use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    /// Exact match on both `username` and `password`.
    async fn find_by_credentials(&self, username: &str, password: &str)
        -> DomainResult<Option<User>>;
    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn count_users(&self) -> DomainResult<u64>;
}
