use sea_orm_migration::prelude::*;

mod m20250101_000001_create_products;

/// Schema migrations for tables the application owns up front.
///
/// `orders` is deliberately absent: it is created on first use by
/// [`crate::services::order_service::ensure_orders_table`].
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_products::Migration)]
    }
}
