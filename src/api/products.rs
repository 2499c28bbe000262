//! Product listing handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::domain::quality::validate_quality_metrics;
use crate::domain::{NewProduct, Product, ProductId, ProductUpdate};
use crate::error::Error;
use crate::port::Store;

use super::{predictions, ApiError, AppState};

pub async fn list<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.store.list_products().await?))
}

/// Create a listing and its initial 14-day forecast batch.
///
/// The forecast insert runs inside the request, so a storage failure there
/// surfaces as the request error even though the product row is already
/// saved. There is no compensating delete.
pub async fn create<S: Store>(
    State(state): State<AppState<S>>,
    Json(new): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    new.validate()?;

    let now = Utc::now();
    let metrics = validate_quality_metrics(&new.quality_metrics);
    let product = Product::create(new, metrics, now);
    state.store.save_product(&product).await?;

    let batch = predictions::forecast_batch(&product.byproduct_type, &state.tables);
    state.store.save_predictions(&batch).await?;

    tracing::info!(
        product_id = %product.id,
        byproduct = %product.byproduct_type,
        "product listed"
    );
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<Product>, ApiError> {
    let id = ProductId::from(id);
    let product = state
        .store
        .update_product(&id, update, Utc::now())
        .await?
        .ok_or_else(|| Error::not_found("product", id.as_str()))?;
    Ok(Json(product))
}

pub async fn remove<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = ProductId::from(id);
    if !state.store.delete_product(&id).await? {
        return Err(Error::not_found("product", id.as_str()).into());
    }
    Ok(Json(json!({ "success": true })))
}
