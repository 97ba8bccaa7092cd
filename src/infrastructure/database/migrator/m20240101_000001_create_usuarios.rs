//! Create usuarios table

use sea_orm_migration::prelude::*;

/// Allowed values of `usuarios.rol`
const ROLES: [&str; 3] = ["administrador", "perito", "supervisor"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuarios::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Usuarios::Nombre).text().not_null())
                    .col(
                        ColumnDef::new(Usuarios::Username)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Usuarios::Password).text().not_null())
                    .col(
                        ColumnDef::new(Usuarios::Rol)
                            .text()
                            .not_null()
                            .check(Expr::col(Usuarios::Rol).is_in(ROLES)),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Usuarios {
    Table,
    Id,
    Nombre,
    Username,
    Password,
    Rol,
}
