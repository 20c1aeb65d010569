use sea_orm::{ ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter };
use uuid::Uuid;

use crate::db::entity::{ business_account, creator_account };
use crate::enums::Currency;
use crate::error::{ AppError, Result };

/// Currency-matched account lookups. Accepts any connection so callers can
/// run lookups inside an open database transaction.
pub struct AccountRepository;

impl AccountRepository {
    pub async fn business_account<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        currency: Currency
    ) -> Result<business_account::Model> {
        business_account::Entity
            ::find()
            .filter(business_account::Column::UserId.eq(user_id))
            .filter(business_account::Column::Currency.eq(currency.as_str()))
            .one(conn).await?
            .ok_or(AppError::NotFound("Business account"))
    }

    pub async fn creator_account<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid,
        currency: Currency
    ) -> Result<creator_account::Model> {
        creator_account::Entity
            ::find()
            .filter(creator_account::Column::UserId.eq(user_id))
            .filter(creator_account::Column::Currency.eq(currency.as_str()))
            .one(conn).await?
            .ok_or(AppError::NotFound("Creator account"))
    }

    pub async fn business_accounts<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid
    ) -> Result<Vec<business_account::Model>> {
        let accounts = business_account::Entity
            ::find()
            .filter(business_account::Column::UserId.eq(user_id))
            .all(conn).await?;

        Ok(accounts)
    }

    pub async fn creator_accounts<C: ConnectionTrait>(
        conn: &C,
        user_id: Uuid
    ) -> Result<Vec<creator_account::Model>> {
        let accounts = creator_account::Entity
            ::find()
            .filter(creator_account::Column::UserId.eq(user_id))
            .all(conn).await?;

        Ok(accounts)
    }
}
