use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Participation::Table)
                .if_not_exists()
                .col(ColumnDef::new(Participation::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Participation::CampaignId).uuid().not_null())
                .col(ColumnDef::new(Participation::CreatorId).uuid().not_null())
                .col(ColumnDef::new(Participation::Status).string_len(20).not_null())
                .col(ColumnDef::new(Participation::Pitch).text())
                .col(
                    ColumnDef::new(Participation::AppliedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .col(ColumnDef::new(Participation::ReviewedAt).timestamp_with_time_zone())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_participation_campaign")
                        .from(Participation::Table, Participation::CampaignId)
                        .to(Campaign::Table, Campaign::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_participation_creator")
                        .from(Participation::Table, Participation::CreatorId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_participation_campaign_creator")
                .table(Participation::Table)
                .col(Participation::CampaignId)
                .col(Participation::CreatorId)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Participation::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Participation {
    Table,
    Id,
    CampaignId,
    CreatorId,
    Status,
    Pitch,
    AppliedAt,
    ReviewedAt,
}

#[derive(DeriveIden)]
enum Campaign {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
