pub use sea_orm_migration::prelude::*;

mod m20250110_000001_create_users_table;
mod m20250111_000001_create_account_tables;
mod m20250112_000001_create_campaigns_table;
mod m20250113_000001_create_participations_table;
mod m20250114_000001_create_videos_table;
mod m20250115_000001_create_transactions_table;
mod m20250116_000001_create_social_accounts_table;
mod m20250117_000001_create_campaign_messages_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250110_000001_create_users_table::Migration),
            Box::new(m20250111_000001_create_account_tables::Migration),
            Box::new(m20250112_000001_create_campaigns_table::Migration),
            Box::new(m20250113_000001_create_participations_table::Migration),
            Box::new(m20250114_000001_create_videos_table::Migration),
            Box::new(m20250115_000001_create_transactions_table::Migration),
            Box::new(m20250116_000001_create_social_accounts_table::Migration),
            Box::new(m20250117_000001_create_campaign_messages_table::Migration)
        ]
    }
}
