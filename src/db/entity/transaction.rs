use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// Immutable ledger entry. Amount and type are never updated after insert;
/// only `status` may transition (pending -> completed | failed).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub transaction_type: String,
    pub status: String,
    pub campaign_id: Option<Uuid>,
    pub description: Option<String>,
    pub metadata: Option<String>,
    pub transaction_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
