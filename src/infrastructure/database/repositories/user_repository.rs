use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};

use super::db_err;
use crate::domain::{CreateUserDto, DomainError, DomainResult, Role, User, UserRepositoryInterface};
use crate::infrastructure::database::entities::usuario;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: usuario::Rol) -> Role {
    match role {
        usuario::Rol::Administrador => Role::Administrator,
        usuario::Rol::Perito => Role::Perito,
        usuario::Rol::Supervisor => Role::Supervisor,
    }
}

fn domain_role_to_entity(role: Role) -> usuario::Rol {
    match role {
        Role::Administrator => usuario::Rol::Administrador,
        Role::Perito => usuario::Rol::Perito,
        Role::Supervisor => usuario::Rol::Supervisor,
    }
}

fn user_model_to_domain(model: usuario::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        username: model.username,
        password: model.password,
        role: entity_role_to_domain(model.role),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let new_user = usuario::ActiveModel {
            id: NotSet,
            name: Set(dto.name),
            username: Set(dto.username),
            password: Set(dto.password),
            role: Set(domain_role_to_entity(dto.role)),
        };

        let model = new_user.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                DomainError::Conflict("Username already exists".to_string())
            } else {
                db_err(e)
            }
        })?;

        Ok(user_model_to_domain(model))
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        let model = usuario::Entity::find()
            .filter(usuario::Column::Username.eq(username))
            .filter(usuario::Column::Password.eq(password))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = usuario::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn count_users(&self) -> DomainResult<u64> {
        usuario::Entity::find().count(&self.db).await.map_err(db_err)
    }
}

// ── Tests ──────────────────────────────────────────────────────
