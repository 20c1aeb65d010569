use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(CampaignMessage::Table)
                .if_not_exists()
                .col(ColumnDef::new(CampaignMessage::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(CampaignMessage::CampaignId).uuid().not_null())
                .col(ColumnDef::new(CampaignMessage::SenderId).uuid().not_null())
                .col(ColumnDef::new(CampaignMessage::Body).text().not_null())
                .col(
                    ColumnDef::new(CampaignMessage::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_campaign_message_campaign")
                        .from(CampaignMessage::Table, CampaignMessage::CampaignId)
                        .to(Campaign::Table, Campaign::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_campaign_message_sender")
                        .from(CampaignMessage::Table, CampaignMessage::SenderId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_campaign_message_campaign_id")
                .table(CampaignMessage::Table)
                .col(CampaignMessage::CampaignId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CampaignMessage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum CampaignMessage {
    Table,
    Id,
    CampaignId,
    SenderId,
    Body,
    CreatedAt,
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
