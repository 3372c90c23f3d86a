//! Create consum_energie table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConsumEnergie::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConsumEnergie::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ConsumEnergie::ClientId).integer().not_null())
                    .col(ColumnDef::new(ConsumEnergie::Locatie).string().not_null())
                    .col(
                        ColumnDef::new(ConsumEnergie::StatusContor)
                            .string_len(50)
                            .not_null()
                            .default("ok"),
                    )
                    .col(ColumnDef::new(ConsumEnergie::TipClient).string().not_null())
                    .col(ColumnDef::new(ConsumEnergie::ConsumKwh).double().not_null())
                    .col(ColumnDef::new(ConsumEnergie::DataCitire).date().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_consum_energie_client")
                    .table(ConsumEnergie::Table)
                    .col(ConsumEnergie::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_consum_energie_data")
                    .table(ConsumEnergie::Table)
                    .col(ConsumEnergie::DataCitire)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConsumEnergie::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ConsumEnergie {
    Table,
    Id,
    #[iden = "ClientID"]
    ClientId,
    #[iden = "Locatie"]
    Locatie,
    #[iden = "StatusContor"]
    StatusContor,
    #[iden = "TipClient"]
    TipClient,
    #[iden = "Consum_kWh"]
    ConsumKwh,
    #[iden = "DataCitire"]
    DataCitire,
}
