//! Meter reading entity (`consum_energie`)
//!
//! Column names keep the legacy mixed-case spelling of the table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "consum_energie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "ClientID")]
    pub client_id: i32,
    #[sea_orm(column_name = "Locatie")]
    pub locatie: String,
    #[sea_orm(column_name = "StatusContor")]
    pub status_contor: String,
    #[sea_orm(column_name = "TipClient")]
    pub tip_client: String,
    #[sea_orm(column_name = "Consum_kWh")]
    pub consum_kwh: f64,
    #[sea_orm(column_name = "DataCitire")]
    pub data_citire: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
