use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(SocialAccount::Table)
                .if_not_exists()
                .col(ColumnDef::new(SocialAccount::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(SocialAccount::CreatorId).uuid().not_null())
                .col(ColumnDef::new(SocialAccount::Platform).string_len(20).not_null())
                .col(ColumnDef::new(SocialAccount::Username).string().not_null())
                .col(ColumnDef::new(SocialAccount::AccessToken).string())
                .col(ColumnDef::new(SocialAccount::RefreshToken).string())
                .col(ColumnDef::new(SocialAccount::TokenExpiresAt).timestamp_with_time_zone())
                .col(ColumnDef::new(SocialAccount::IsConnected).boolean().not_null().default(true))
                .col(ColumnDef::new(SocialAccount::FollowerCount).big_integer().not_null().default(0))
                .col(ColumnDef::new(SocialAccount::LastSynced).timestamp_with_time_zone())
                .col(
                    ColumnDef::new(SocialAccount::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .col(
                    ColumnDef::new(SocialAccount::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_social_account_creator")
                        .from(SocialAccount::Table, SocialAccount::CreatorId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_social_account_creator_platform")
                .table(SocialAccount::Table)
                .col(SocialAccount::CreatorId)
                .col(SocialAccount::Platform)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SocialAccount::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SocialAccount {
    Table,
    Id,
    CreatorId,
    Platform,
    Username,
    AccessToken,
    RefreshToken,
    TokenExpiresAt,
    IsConnected,
    FollowerCount,
    LastSynced,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
