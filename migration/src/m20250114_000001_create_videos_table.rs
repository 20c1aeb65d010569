use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Video::Table)
                .if_not_exists()
                .col(ColumnDef::new(Video::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Video::CampaignId).uuid().not_null())
                .col(ColumnDef::new(Video::CreatorId).uuid().not_null())
                .col(ColumnDef::new(Video::Title).string().not_null())
                .col(ColumnDef::new(Video::Description).text())
                .col(ColumnDef::new(Video::VideoUrl).string().not_null())
                .col(ColumnDef::new(Video::AssetId).string())
                .col(ColumnDef::new(Video::Status).string_len(20).not_null())
                .col(ColumnDef::new(Video::PostedToSocial).boolean().not_null().default(false))
                .col(ColumnDef::new(Video::ViewCount).big_integer().not_null().default(0))
                .col(ColumnDef::new(Video::LikeCount).big_integer().not_null().default(0))
                .col(ColumnDef::new(Video::CommentCount).big_integer().not_null().default(0))
                .col(ColumnDef::new(Video::ReviewedBy).uuid())
                .col(ColumnDef::new(Video::ReviewedAt).timestamp_with_time_zone())
                .col(ColumnDef::new(Video::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Video::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_video_campaign")
                        .from(Video::Table, Video::CampaignId)
                        .to(Campaign::Table, Campaign::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_video_creator")
                        .from(Video::Table, Video::CreatorId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_video_campaign_id")
                .table(Video::Table)
                .col(Video::CampaignId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_video_creator_id")
                .table(Video::Table)
                .col(Video::CreatorId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Video::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Video {
    Table,
    Id,
    CampaignId,
    CreatorId,
    Title,
    Description,
    VideoUrl,
    AssetId,
    Status,
    PostedToSocial,
    ViewCount,
    LikeCount,
    CommentCount,
    ReviewedBy,
    ReviewedAt,
    CreatedAt,
    UpdatedAt,
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
