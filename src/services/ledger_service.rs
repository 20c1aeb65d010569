use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    DatabaseConnection,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    Set,
    TransactionTrait,
    prelude::Decimal,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::db::AccountRepository;
use crate::db::entity::{ business_account, campaign, campaign_budget_tracking, creator_account, transaction };
use crate::enums::{ Currency, TransactionStatus, TransactionType, UserRole };
use crate::error::{ AppError, Result };
use crate::policy::{ self, Actor };
use crate::validate;

pub struct NewTransaction {
    pub amount: Decimal,
    pub currency: Currency,
    pub transaction_type: TransactionType,
    pub campaign_id: Option<Uuid>,
    pub description: Option<String>,
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct BalanceView {
    pub currency: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TypeStatistics {
    pub transaction_type: String,
    pub count: u64,
    pub total: Decimal,
}

/// Double-entry ledger over business balances and creator available
/// balances. Every multi-row movement runs inside a single database
/// transaction; a failed step rolls the whole unit of work back.
pub struct LedgerService {
    db: DatabaseConnection,
}

impl LedgerService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Pay a creator out of a campaign budget: debit the business balance,
    /// credit the creator's available balance, record the inverse
    /// commission/creator_earning pair and bump the campaign spend tracker.
    pub async fn process_payment(
        &self,
        actor: &Actor,
        campaign_id: Uuid,
        creator_id: Uuid,
        amount: Decimal
    ) -> Result<(transaction::Model, transaction::Model)> {
        policy::require_role(actor, UserRole::Business)?;
        validate::require_positive_amount(amount)?;

        let campaign = campaign::Entity
            ::find_by_id(campaign_id)
            .one(&self.db).await?
            .ok_or(AppError::NotFound("Campaign"))?;

        if campaign.business_id != actor.user_id {
            return Err(AppError::Forbidden("Campaign belongs to another business".to_string()));
        }

        let currency: Currency = campaign.currency.parse()?;

        let txn = self.db.begin().await?;

        let business = AccountRepository::business_account(&txn, actor.user_id, currency).await?;
        let creator = AccountRepository::creator_account(&txn, creator_id, currency).await?;

        if business.balance < amount {
            return Err(AppError::InsufficientFunds);
        }

        let now = chrono::Utc::now();

        business_account::Entity
            ::update_many()
            .col_expr(
                business_account::Column::Balance,
                Expr::col(business_account::Column::Balance).sub(amount)
            )
            .col_expr(business_account::Column::UpdatedAt, Expr::value(now))
            .filter(business_account::Column::Id.eq(business.id))
            .exec(&txn).await?;

        creator_account::Entity
            ::update_many()
            .col_expr(
                creator_account::Column::AvailableBalance,
                Expr::col(creator_account::Column::AvailableBalance).add(amount)
            )
            .col_expr(creator_account::Column::UpdatedAt, Expr::value(now))
            .filter(creator_account::Column::Id.eq(creator.id))
            .exec(&txn).await?;

        let debit = insert_transaction(&txn, TransactionRow {
            user_id: actor.user_id,
            amount: -amount,
            currency,
            transaction_type: TransactionType::Commission,
            status: TransactionStatus::Completed,
            campaign_id: Some(campaign.id),
            description: Some(format!("Payment for campaign '{}'", campaign.title)),
            metadata: None,
        }).await?;

        let credit = insert_transaction(&txn, TransactionRow {
            user_id: creator_id,
            amount,
            currency,
            transaction_type: TransactionType::CreatorEarning,
            status: TransactionStatus::Completed,
            campaign_id: Some(campaign.id),
            description: Some(format!("Earning from campaign '{}'", campaign.title)),
            metadata: None,
        }).await?;

        let updated = campaign_budget_tracking::Entity
            ::update_many()
            .col_expr(
                campaign_budget_tracking::Column::SpentAmount,
                Expr::col(campaign_budget_tracking::Column::SpentAmount).add(amount)
            )
            .col_expr(campaign_budget_tracking::Column::UpdatedAt, Expr::value(now))
            .filter(campaign_budget_tracking::Column::CampaignId.eq(campaign.id))
            .exec(&txn).await?;

        if updated.rows_affected == 0 {
            return Err(AppError::NotFound("Campaign budget tracking"));
        }

        txn.commit().await?;

        tracing::info!(
            campaign_id = %campaign.id,
            business_id = %actor.user_id,
            creator_id = %creator_id,
            %amount,
            "Processed campaign payment"
        );

        Ok((debit, credit))
    }

    /// Credit a business balance and record a completed deposit.
    pub async fn deposit(
        &self,
        actor: &Actor,
        amount: Decimal,
        currency: Currency
    ) -> Result<transaction::Model> {
        policy::require_role(actor, UserRole::Business)?;
        validate::require_positive_amount(amount)?;

        let txn = self.db.begin().await?;

        let account = AccountRepository::business_account(&txn, actor.user_id, currency).await?;
        let now = chrono::Utc::now();

        business_account::Entity
            ::update_many()
            .col_expr(
                business_account::Column::Balance,
                Expr::col(business_account::Column::Balance).add(amount)
            )
            .col_expr(business_account::Column::UpdatedAt, Expr::value(now))
            .filter(business_account::Column::Id.eq(account.id))
            .exec(&txn).await?;

        let row = insert_transaction(&txn, TransactionRow {
            user_id: actor.user_id,
            amount,
            currency,
            transaction_type: TransactionType::Deposit,
            status: TransactionStatus::Completed,
            campaign_id: None,
            description: None,
            metadata: None,
        }).await?;

        txn.commit().await?;
        Ok(row)
    }

    /// Debit a creator's available balance and record a pending withdrawal
    /// awaiting external settlement.
    pub async fn withdraw(
        &self,
        actor: &Actor,
        amount: Decimal,
        currency: Currency
    ) -> Result<transaction::Model> {
        policy::require_role(actor, UserRole::Creator)?;
        validate::require_positive_amount(amount)?;

        let txn = self.db.begin().await?;

        let account = AccountRepository::creator_account(&txn, actor.user_id, currency).await?;

        if account.available_balance < amount {
            return Err(AppError::InsufficientFunds);
        }

        let now = chrono::Utc::now();

        creator_account::Entity
            ::update_many()
            .col_expr(
                creator_account::Column::AvailableBalance,
                Expr::col(creator_account::Column::AvailableBalance).sub(amount)
            )
            .col_expr(creator_account::Column::UpdatedAt, Expr::value(now))
            .filter(creator_account::Column::Id.eq(account.id))
            .exec(&txn).await?;

        let row = insert_transaction(&txn, TransactionRow {
            user_id: actor.user_id,
            amount: -amount,
            currency,
            transaction_type: TransactionType::Withdrawal,
            status: TransactionStatus::Pending,
            campaign_id: None,
            description: None,
            metadata: None,
        }).await?;

        txn.commit().await?;
        Ok(row)
    }

    /// Settlement outcome reported by the external payout collaborator.
    /// Only pending withdrawals may transition; a failed settlement puts the
    /// funds back on the creator's available balance.
    pub async fn settle_withdrawal(
        &self,
        actor: &Actor,
        transaction_id: Uuid,
        outcome: TransactionStatus
    ) -> Result<transaction::Model> {
        policy::require_admin(actor)?;

        if outcome == TransactionStatus::Pending {
            return Err(
                AppError::InvalidInput("Settlement outcome must be completed or failed".to_string())
            );
        }

        let txn = self.db.begin().await?;

        let row = transaction::Entity
            ::find_by_id(transaction_id)
            .one(&txn).await?
            .ok_or(AppError::NotFound("Transaction"))?;

        if row.transaction_type != TransactionType::Withdrawal.as_str() {
            return Err(
                AppError::InvalidStateTransition("Only withdrawals can be settled".to_string())
            );
        }

        // The flip is conditional on the pending status, so a withdrawal
        // never settles twice even under concurrent requests.
        let flipped = transaction::Entity
            ::update_many()
            .col_expr(transaction::Column::Status, Expr::value(outcome.as_str()))
            .filter(transaction::Column::Id.eq(transaction_id))
            .filter(transaction::Column::Status.eq(TransactionStatus::Pending.as_str()))
            .exec(&txn).await?;
        if flipped.rows_affected == 0 {
            return Err(
                AppError::InvalidStateTransition(
                    format!("Withdrawal is already {}", row.status)
                )
            );
        }

        if outcome == TransactionStatus::Failed {
            let currency: Currency = row.currency.parse()?;
            let refund = -row.amount; // withdrawal amounts are stored negated
            let account = AccountRepository::creator_account(&txn, row.user_id, currency).await?;
            creator_account::Entity
                ::update_many()
                .col_expr(
                    creator_account::Column::AvailableBalance,
                    Expr::col(creator_account::Column::AvailableBalance).add(refund)
                )
                .col_expr(creator_account::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
                .filter(creator_account::Column::Id.eq(account.id))
                .exec(&txn).await?;
        }

        let row = transaction::Entity
            ::find_by_id(transaction_id)
            .one(&txn).await?
            .ok_or(AppError::NotFound("Transaction"))?;

        txn.commit().await?;
        Ok(row)
    }

    /// Generic ledger entry for the actor, created pending.
    pub async fn create_transaction(
        &self,
        actor: &Actor,
        input: NewTransaction
    ) -> Result<transaction::Model> {
        validate::require_positive_amount(input.amount.abs())?;

        insert_transaction(&self.db, TransactionRow {
            user_id: actor.user_id,
            amount: input.amount,
            currency: input.currency,
            transaction_type: input.transaction_type,
            status: TransactionStatus::Pending,
            campaign_id: input.campaign_id,
            description: input.description,
            metadata: input.metadata,
        }).await
    }

    pub async fn list_transactions(
        &self,
        actor: &Actor,
        limit: Option<u64>,
        offset: Option<u64>
    ) -> Result<Vec<transaction::Model>> {
        use sea_orm::QuerySelect;

        let transactions = transaction::Entity
            ::find()
            .filter(transaction::Column::UserId.eq(actor.user_id))
            .order_by_desc(transaction::Column::TransactionDate)
            .limit(limit)
            .offset(offset)
            .all(&self.db).await?;

        Ok(transactions)
    }

    /// Per-currency balance for the actor's role-specific account rows.
    pub async fn balances(&self, actor: &Actor) -> Result<Vec<BalanceView>> {
        let balances = match actor.role {
            UserRole::Business =>
                AccountRepository::business_accounts(&self.db, actor.user_id).await?
                    .into_iter()
                    .map(|a| BalanceView { currency: a.currency, amount: a.balance })
                    .collect(),
            UserRole::Creator =>
                AccountRepository::creator_accounts(&self.db, actor.user_id).await?
                    .into_iter()
                    .map(|a| BalanceView { currency: a.currency, amount: a.available_balance })
                    .collect(),
            UserRole::Admin => {
                return Err(
                    AppError::Forbidden("Admin accounts do not hold balances".to_string())
                );
            }
        };

        Ok(balances)
    }

    /// Totals per transaction type over the actor's full history.
    pub async fn statistics(&self, actor: &Actor) -> Result<Vec<TypeStatistics>> {
        let rows = transaction::Entity
            ::find()
            .filter(transaction::Column::UserId.eq(actor.user_id))
            .all(&self.db).await?;

        let mut stats: Vec<TypeStatistics> = Vec::new();
        for row in rows {
            match stats.iter_mut().find(|s| s.transaction_type == row.transaction_type) {
                Some(entry) => {
                    entry.count += 1;
                    entry.total += row.amount;
                }
                None =>
                    stats.push(TypeStatistics {
                        transaction_type: row.transaction_type,
                        count: 1,
                        total: row.amount,
                    }),
            }
        }

        Ok(stats)
    }
}

struct TransactionRow {
    user_id: Uuid,
    amount: Decimal,
    currency: Currency,
    transaction_type: TransactionType,
    status: TransactionStatus,
    campaign_id: Option<Uuid>,
    description: Option<String>,
    metadata: Option<String>,
}

async fn insert_transaction<C: ConnectionTrait>(
    conn: &C,
    row: TransactionRow
) -> Result<transaction::Model> {
    let model = transaction::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(row.user_id),
        amount: Set(row.amount),
        currency: Set(row.currency.as_str().to_string()),
        transaction_type: Set(row.transaction_type.as_str().to_string()),
        status: Set(row.status.as_str().to_string()),
        campaign_id: Set(row.campaign_id),
        description: Set(row.description),
        metadata: Set(row.metadata),
        transaction_date: Set(chrono::Utc::now()),
    };

    let row = model.insert(conn).await?;
    Ok(row)
}
