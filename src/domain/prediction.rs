//! Price prediction records.
//!
//! Predictions are created in batches of 14 (one per future day) and are
//! immutable once created; there is no update or delete path.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::byproduct::ByproductType;
use super::id::PredictionId;
use super::tables::DemandLevel;

/// Supply-side factor attached to a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyLevel {
    Low,
    Medium,
    High,
}

/// Seasonal factor attached to a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seasonality {
    #[serde(rename = "peak")]
    Peak,
    #[serde(rename = "off-peak")]
    OffPeak,
}

/// The qualitative factors reported alongside a predicted price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionFactors {
    pub demand: DemandLevel,
    pub supply: SupplyLevel,
    pub seasonality: Seasonality,
}

/// A single-day price prediction, before persistence assigns an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPricePrediction {
    pub byproduct_type: ByproductType,
    pub current_price: Decimal,
    pub predicted_price: Decimal,
    pub prediction_date: DateTime<Utc>,
    /// Percent, 0-100. Decreases with the prediction horizon.
    pub confidence: Decimal,
    pub factors: PredictionFactors,
}

/// A persisted price prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePrediction {
    pub id: PredictionId,
    pub byproduct_type: ByproductType,
    pub current_price: Decimal,
    pub predicted_price: Decimal,
    pub prediction_date: DateTime<Utc>,
    pub confidence: Decimal,
    pub factors: PredictionFactors,
    pub created_at: DateTime<Utc>,
}

impl PricePrediction {
    /// Assign an identity to a draft prediction.
    #[must_use]
    pub fn create(new: NewPricePrediction, now: DateTime<Utc>) -> Self {
        Self {
            id: PredictionId::new(),
            byproduct_type: new.byproduct_type,
            current_price: new.current_price,
            predicted_price: new.predicted_price,
            prediction_date: new.prediction_date,
            confidence: new.confidence,
            factors: new.factors,
            created_at: now,
        }
    }
}
