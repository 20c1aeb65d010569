use axum::{ Extension, Json, extract::{ Path, Query, State } };
use sea_orm::prelude::Decimal;
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::auth::Claims;
use crate::db::entity::transaction;
use crate::enums::{ Currency, TransactionStatus, TransactionType };
use crate::error::Result;
use crate::policy::Actor;
use crate::services::ledger_service::{ BalanceView, NewTransaction, TypeStatistics };

use super::AppState;

#[derive(Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: Decimal,
    pub currency: Currency,
    pub transaction_type: TransactionType,
    pub campaign_id: Option<Uuid>,
    pub description: Option<String>,
    pub metadata: Option<String>,
}

#[derive(Deserialize)]
pub struct ListQueryParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Deserialize)]
pub struct MoveFundsRequest {
    pub amount: Decimal,
    pub currency: Currency,
}

#[derive(Deserialize)]
pub struct PaymentRequest {
    pub campaign_id: Uuid,
    pub creator_id: Uuid,
    pub amount: Decimal,
}

#[derive(Deserialize)]
pub struct SettleRequest {
    pub outcome: TransactionStatus,
}

#[derive(Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub transaction_type: String,
    pub status: String,
    pub campaign_id: Option<Uuid>,
    pub description: Option<String>,
    pub transaction_date: String,
}

#[derive(Serialize)]
pub struct PaymentResponse {
    pub debit: TransactionResponse,
    pub credit: TransactionResponse,
}

impl From<transaction::Model> for TransactionResponse {
    fn from(tx: transaction::Model) -> Self {
        Self {
            id: tx.id,
            user_id: tx.user_id,
            amount: tx.amount,
            currency: tx.currency,
            transaction_type: tx.transaction_type,
            status: tx.status,
            campaign_id: tx.campaign_id,
            description: tx.description,
            transaction_date: tx.transaction_date.to_rfc3339(),
        }
    }
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateTransactionRequest>
) -> Result<Json<TransactionResponse>> {
    let actor = Actor::from(&claims);
    let tx = state.ledger_service.create_transaction(&actor, NewTransaction {
        amount: request.amount,
        currency: request.currency,
        transaction_type: request.transaction_type,
        campaign_id: request.campaign_id,
        description: request.description,
        metadata: request.metadata,
    }).await?;

    Ok(Json(tx.into()))
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<ListQueryParams>
) -> Result<Json<Vec<TransactionResponse>>> {
    let actor = Actor::from(&claims);
    let transactions = state.ledger_service.list_transactions(
        &actor,
        params.limit,
        params.offset
    ).await?;

    Ok(Json(transactions.into_iter().map(Into::into).collect()))
}

pub async fn balance(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>
) -> Result<Json<Vec<BalanceView>>> {
    let actor = Actor::from(&claims);
    let balances = state.ledger_service.balances(&actor).await?;
    Ok(Json(balances))
}

pub async fn deposit(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<MoveFundsRequest>
) -> Result<Json<TransactionResponse>> {
    let actor = Actor::from(&claims);
    let tx = state.ledger_service.deposit(&actor, request.amount, request.currency).await?;
    Ok(Json(tx.into()))
}

pub async fn withdraw(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<MoveFundsRequest>
) -> Result<Json<TransactionResponse>> {
    let actor = Actor::from(&claims);
    let tx = state.ledger_service.withdraw(&actor, request.amount, request.currency).await?;
    Ok(Json(tx.into()))
}

pub async fn process_payment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<PaymentRequest>
) -> Result<Json<PaymentResponse>> {
    let actor = Actor::from(&claims);
    let (debit, credit) = state.ledger_service.process_payment(
        &actor,
        request.campaign_id,
        request.creator_id,
        request.amount
    ).await?;

    Ok(
        Json(PaymentResponse {
            debit: debit.into(),
            credit: credit.into(),
        })
    )
}

pub async fn settle_withdrawal(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<SettleRequest>
) -> Result<Json<TransactionResponse>> {
    let actor = Actor::from(&claims);
    let tx = state.ledger_service.settle_withdrawal(&actor, id, request.outcome).await?;
    Ok(Json(tx.into()))
}

pub async fn statistics(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>
) -> Result<Json<Vec<TypeStatistics>>> {
    let actor = Actor::from(&claims);
    let stats = state.ledger_service.statistics(&actor).await?;
    Ok(Json(stats))
}
