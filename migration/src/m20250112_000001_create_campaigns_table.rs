use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(Campaign::Table)
                .if_not_exists()
                .col(ColumnDef::new(Campaign::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Campaign::BusinessId).uuid().not_null())
                .col(ColumnDef::new(Campaign::Title).string().not_null())
                .col(ColumnDef::new(Campaign::Description).text().not_null())
                .col(ColumnDef::new(Campaign::Budget).decimal().not_null())
                .col(ColumnDef::new(Campaign::Currency).string_len(10).not_null())
                .col(ColumnDef::new(Campaign::Status).string_len(20).not_null())
                .col(ColumnDef::new(Campaign::StartsAt).timestamp_with_time_zone())
                .col(ColumnDef::new(Campaign::EndsAt).timestamp_with_time_zone())
                .col(ColumnDef::new(Campaign::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(Campaign::UpdatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_campaign_business_user")
                        .from(Campaign::Table, Campaign::BusinessId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_campaign_business_id")
                .table(Campaign::Table)
                .col(Campaign::BusinessId)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_campaign_status")
                .table(Campaign::Table)
                .col(Campaign::Status)
                .to_owned()
        ).await?;

        manager.create_table(
            Table::create()
                .table(CampaignBudgetTracking::Table)
                .if_not_exists()
                .col(ColumnDef::new(CampaignBudgetTracking::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(CampaignBudgetTracking::CampaignId).uuid().not_null())
                .col(ColumnDef::new(CampaignBudgetTracking::TotalBudget).decimal().not_null())
                .col(ColumnDef::new(CampaignBudgetTracking::SpentAmount).decimal().not_null())
                .col(
                    ColumnDef::new(CampaignBudgetTracking::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_budget_tracking_campaign")
                        .from(CampaignBudgetTracking::Table, CampaignBudgetTracking::CampaignId)
                        .to(Campaign::Table, Campaign::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .name("idx_budget_tracking_campaign_id")
                .table(CampaignBudgetTracking::Table)
                .col(CampaignBudgetTracking::CampaignId)
                .unique()
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(CampaignBudgetTracking::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Campaign::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Campaign {
    Table,
    Id,
    BusinessId,
    Title,
    Description,
    Budget,
    Currency,
    Status,
    StartsAt,
    EndsAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CampaignBudgetTracking {
    Table,
    Id,
    CampaignId,
    TotalBudget,
    SpentAmount,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
