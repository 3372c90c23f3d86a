//! Create userweb table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Userweb::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Userweb::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Userweb::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Userweb::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Userweb::Password).string().not_null())
                    .col(
                        ColumnDef::new(Userweb::Rol)
                            .string_len(20)
                            .not_null()
                            .default("user"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Userweb::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Userweb {
    Table,
    Id,
    Username,
    Email,
    Password,
    Rol,
}
