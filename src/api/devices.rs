//! IoT device handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::domain::{DeviceId, DeviceReading, IotDevice, NewIotDevice};
use crate::error::Error;
use crate::port::Store;

use super::{ApiError, AppState};

pub async fn list<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<IotDevice>>, ApiError> {
    Ok(Json(state.store.list_devices().await?))
}

pub async fn create<S: Store>(
    State(state): State<AppState<S>>,
    Json(new): Json<NewIotDevice>,
) -> Result<(StatusCode, Json<IotDevice>), ApiError> {
    new.validate()?;

    let device = IotDevice::create(new, Utc::now());
    state.store.save_device(&device).await?;

    tracing::info!(device_id = %device.id, device_type = %device.device_type, "device registered");
    Ok((StatusCode::CREATED, Json(device)))
}

#[derive(Debug, Deserialize)]
pub struct ReadingBody {
    pub value: f64,
    pub unit: String,
}

/// Replace a device's last reading, stamping the current time.
pub async fn set_reading<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(body): Json<ReadingBody>,
) -> Result<Json<IotDevice>, ApiError> {
    let id = DeviceId::from(id);
    let now = Utc::now();
    let reading = DeviceReading {
        value: body.value,
        unit: body.unit,
        timestamp: now,
    };
    let device = state
        .store
        .set_device_reading(&id, reading, now)
        .await?
        .ok_or_else(|| Error::not_found("device", id.as_str()))?;
    Ok(Json(device))
}
