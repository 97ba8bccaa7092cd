//! Create informes table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Informes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Informes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Informes::Titulo).text().not_null())
                    .col(ColumnDef::new(Informes::Descripcion).text().not_null())
                    .col(ColumnDef::new(Informes::Fecha).date().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Informes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Informes {
    Table,
    Id,
    Titulo,
    Descripcion,
    Fecha,
}
