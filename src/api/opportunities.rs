//! Export opportunity handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::domain::export::match_export_opportunities;
use crate::domain::tables::ReferenceTables;
use crate::domain::{ByproductType, ExportOpportunity, Product, ProductId};
use crate::error::Error;
use crate::port::Store;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct OpportunityQuery {
    pub byproduct_type: Option<String>,
}

pub async fn list<S: Store>(
    State(state): State<AppState<S>>,
    Query(query): Query<OpportunityQuery>,
) -> Result<Json<Vec<ExportOpportunity>>, ApiError> {
    let filter = query.byproduct_type.map(ByproductType::from);
    Ok(Json(state.store.list_opportunities(filter.as_ref()).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub product_id: ProductId,
}

/// Score the product against every target market and persist the batch.
pub async fn generate<S: Store>(
    State(state): State<AppState<S>>,
    Json(request): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<Vec<ExportOpportunity>>), ApiError> {
    let product = state
        .store
        .get_product(&request.product_id)
        .await?
        .ok_or_else(|| Error::not_found("product", request.product_id.as_str()))?;

    let batch = opportunity_batch(&product, &state.tables);
    state.store.save_opportunities(&batch).await?;

    tracing::info!(
        product_id = %product.id,
        count = batch.len(),
        "export opportunities generated"
    );
    Ok((StatusCode::CREATED, Json(batch)))
}

// Kept synchronous so the thread-local rng never lives across an await.
fn opportunity_batch(product: &Product, tables: &ReferenceTables) -> Vec<ExportOpportunity> {
    let now = Utc::now();
    let mut rng = rand::thread_rng();
    match_export_opportunities(product, tables, &mut rng)
        .into_iter()
        .map(|draft| ExportOpportunity::create(draft, now))
        .collect()
}
