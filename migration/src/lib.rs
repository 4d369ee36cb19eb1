pub use sea_orm_migration::prelude::*;

mod m20250310_000001_create_users;
mod m20250310_000002_create_items;
mod m20250310_000003_create_item_requests;
mod m20250310_000004_create_messaging;
mod m20250310_000005_create_feedback;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000001_create_users::Migration),
            Box::new(m20250310_000002_create_items::Migration),
            Box::new(m20250310_000003_create_item_requests::Migration),
            Box::new(m20250310_000004_create_messaging::Migration),
            Box::new(m20250310_000005_create_feedback::Migration),
        ]
    }
}
