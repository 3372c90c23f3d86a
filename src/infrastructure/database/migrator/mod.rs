//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_userweb;
mod m20240101_000002_create_consum_energie;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_userweb::Migration),
            Box::new(m20240101_000002_create_consum_energie::Migration),
        ]
    }
}
