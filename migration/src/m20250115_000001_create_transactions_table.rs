use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Transaction::Table)
                .if_not_exists()
                .col(ColumnDef::new(Transaction::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Transaction::UserId).uuid().not_null())
                .col(ColumnDef::new(Transaction::Amount).decimal().not_null())
                .col(ColumnDef::new(Transaction::Currency).string_len(10).not_null())
                .col(ColumnDef::new(Transaction::TransactionType).string_len(30).not_null())
                .col(ColumnDef::new(Transaction::Status).string_len(20).not_null())
                .col(ColumnDef::new(Transaction::CampaignId).uuid())
                .col(ColumnDef::new(Transaction::Description).string())
                .col(ColumnDef::new(Transaction::Metadata).text())
                .col(
                    ColumnDef::new(Transaction::TransactionDate)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_transaction_user")
                        .from(Transaction::Table, Transaction::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_transaction_user_id")
                .table(Transaction::Table)
                .col(Transaction::UserId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_transaction_date")
                .table(Transaction::Table)
                .col(Transaction::TransactionDate)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Transaction::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Transaction {
    Table,
    Id,
    UserId,
    Amount,
    Currency,
    TransactionType,
    Status,
    CampaignId,
    Description,
    Metadata,
    TransactionDate,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
