use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(BusinessAccount::Table)
                .if_not_exists()
                .col(ColumnDef::new(BusinessAccount::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(BusinessAccount::UserId).uuid().not_null())
                .col(ColumnDef::new(BusinessAccount::Currency).string_len(10).not_null())
                .col(ColumnDef::new(BusinessAccount::Balance).decimal().not_null())
                .col(
                    ColumnDef::new(BusinessAccount::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .col(
                    ColumnDef::new(BusinessAccount::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_business_account_user")
                        .from(BusinessAccount::Table, BusinessAccount::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_business_account_user_currency")
                .table(BusinessAccount::Table)
                .col(BusinessAccount::UserId)
                .col(BusinessAccount::Currency)
                .unique()
                .to_owned()
        ).await?;

        manager.create_table(
            Table::create()
                .table(CreatorAccount::Table)
                .if_not_exists()
                .col(ColumnDef::new(CreatorAccount::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(CreatorAccount::UserId).uuid().not_null())
                .col(ColumnDef::new(CreatorAccount::Currency).string_len(10).not_null())
                .col(ColumnDef::new(CreatorAccount::AvailableBalance).decimal().not_null())
                .col(
                    ColumnDef::new(CreatorAccount::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .col(
                    ColumnDef::new(CreatorAccount::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_creator_account_user")
                        .from(CreatorAccount::Table, CreatorAccount::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_creator_account_user_currency")
                .table(CreatorAccount::Table)
                .col(CreatorAccount::UserId)
                .col(CreatorAccount::Currency)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CreatorAccount::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(BusinessAccount::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BusinessAccount {
    Table,
    Id,
    UserId,
    Currency,
    Balance,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CreatorAccount {
    Table,
    Id,
    UserId,
    Currency,
    AvailableBalance,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
