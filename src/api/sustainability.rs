//! Sustainability report handler.

use axum::extract::State;
use axum::Json;

use crate::domain::sustainability::{generate_sustainability_report, SustainabilityReport};
use crate::port::Store;

use super::{ApiError, AppState};

/// Aggregate every transaction into a single platform-wide report.
pub async fn report<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<SustainabilityReport>, ApiError> {
    let transactions = state.store.list_transactions().await?;
    Ok(Json(generate_sustainability_report(&transactions)))
}
