//! `usuarios` table entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role as stored in `usuarios.rol`
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Rol {
    #[sea_orm(string_value = "administrador")]
    Administrador,
    #[sea_orm(string_value = "perito")]
    Perito,
    #[sea_orm(string_value = "supervisor")]
    Supervisor,
}

/// User row
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "nombre")]
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    #[sea_orm(column_name = "rol")]
    pub role: Rol,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
