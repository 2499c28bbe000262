//! Transaction handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::carbon::calculate_carbon_credits;
use crate::domain::{NewTransaction, Transaction, TransactionId};
use crate::error::Error;
use crate::port::Store;

use super::{ApiError, AppState};

pub async fn list<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    Ok(Json(state.store.list_transactions().await?))
}

/// Record a trade. Carbon credits are computed from the request's quantity
/// and byproduct type at creation time.
pub async fn create<S: Store>(
    State(state): State<AppState<S>>,
    Json(new): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    new.validate()?;

    let now = Utc::now();
    let credits =
        calculate_carbon_credits(Decimal::from(new.quantity), &new.byproduct_type, &state.tables);
    let transaction = build_transaction(new, credits, now);
    state.store.save_transaction(&transaction).await?;

    tracing::info!(
        transaction_id = %transaction.id,
        carbon_credits = %credits,
        "transaction recorded"
    );
    Ok((StatusCode::CREATED, Json(transaction)))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Update a transaction's status. Setting `completed` stamps `completed_at`.
pub async fn set_status<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Result<Json<Transaction>, ApiError> {
    let id = TransactionId::from(id);
    let completed_at = (body.status == "completed").then(Utc::now);
    let transaction = state
        .store
        .set_transaction_status(&id, &body.status, completed_at)
        .await?
        .ok_or_else(|| Error::not_found("transaction", id.as_str()))?;
    Ok(Json(transaction))
}

// Kept synchronous so the thread-local rng never lives across an await.
fn build_transaction(new: NewTransaction, credits: Decimal, now: DateTime<Utc>) -> Transaction {
    Transaction::create(new, credits, now, &mut rand::thread_rng())
}
