use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(User::Table)
                .if_not_exists()
                .col(ColumnDef::new(User::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(User::Email).string().not_null().unique_key())
                .col(ColumnDef::new(User::PasswordHash).string().not_null())
                .col(ColumnDef::new(User::DisplayName).string().not_null())
                .col(ColumnDef::new(User::Role).string_len(20).not_null())
                .col(ColumnDef::new(User::EmailVerified).boolean().not_null().default(false))
                .col(ColumnDef::new(User::VerificationToken).string())
                .col(ColumnDef::new(User::ResetToken).string())
                .col(ColumnDef::new(User::ResetTokenExpiresAt).timestamp_with_time_zone())
                .col(ColumnDef::new(User::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(User::UpdatedAt).timestamp_with_time_zone().not_null())
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_user_email")
                .table(User::Table)
                .col(User::Email)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Email,
    PasswordHash,
    DisplayName,
    Role,
    EmailVerified,
    VerificationToken,
    ResetToken,
    ResetTokenExpiresAt,
    CreatedAt,
    UpdatedAt,
}
