//! Price prediction handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::domain::forecast::generate_price_predictions;
use crate::domain::tables::ReferenceTables;
use crate::domain::{ByproductType, PricePrediction};
use crate::port::Store;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct PredictionQuery {
    pub byproduct_type: Option<String>,
}

pub async fn list<S: Store>(
    State(state): State<AppState<S>>,
    Query(query): Query<PredictionQuery>,
) -> Result<Json<Vec<PricePrediction>>, ApiError> {
    let filter = query.byproduct_type.map(ByproductType::from);
    Ok(Json(state.store.list_predictions(filter.as_ref()).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub byproduct_type: ByproductType,
}

/// Generate and persist a fresh 14-day forecast batch. Repeated calls stack
/// new batches on top of older ones; nothing is deduplicated.
pub async fn generate<S: Store>(
    State(state): State<AppState<S>>,
    Json(request): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<Vec<PricePrediction>>), ApiError> {
    let batch = forecast_batch(&request.byproduct_type, &state.tables);
    state.store.save_predictions(&batch).await?;

    tracing::info!(
        byproduct = %request.byproduct_type,
        count = batch.len(),
        "prediction batch generated"
    );
    Ok((StatusCode::CREATED, Json(batch)))
}

// Kept synchronous so the thread-local rng never lives across an await.
pub(super) fn forecast_batch(
    byproduct: &ByproductType,
    tables: &ReferenceTables,
) -> Vec<PricePrediction> {
    let now = Utc::now();
    let mut rng = rand::thread_rng();
    generate_price_predictions(byproduct, tables, &mut rng, now)
        .into_iter()
        .map(|draft| PricePrediction::create(draft, now))
        .collect()
}
