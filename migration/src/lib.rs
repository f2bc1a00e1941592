pub use sea_orm_migration::prelude::*;

mod m20250901_000001_create_store_tables;
mod m20250918_000001_add_order_expiry_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_store_tables::Migration),
            Box::new(m20250918_000001_add_order_expiry_index::Migration),
        ]
    }
}
