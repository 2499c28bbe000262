//! Export opportunity records.
//!
//! Opportunities are created in batches, one per fixed target market, and
//! are immutable once created.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::byproduct::ByproductType;
use super::id::OpportunityId;
use super::tables::DemandLevel;

/// A scored export lead for one target market, before persistence
/// assigns an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExportOpportunity {
    pub byproduct_type: ByproductType,
    pub target_country: String,
    pub demand_level: DemandLevel,
    /// 0-100, clamped.
    pub match_score: i64,
    /// Display string, e.g. `"₹30-36 per kg"`.
    pub price_range: String,
    /// Minimum order quantity in kg.
    pub minimum_quantity: i64,
    /// Importer quality constraints, e.g. `{"protein": "min 45%"}`.
    pub requirements: BTreeMap<String, String>,
    pub contact_info: String,
}

/// A persisted export opportunity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOpportunity {
    pub id: OpportunityId,
    pub byproduct_type: ByproductType,
    pub target_country: String,
    pub demand_level: DemandLevel,
    pub match_score: i64,
    pub price_range: String,
    pub minimum_quantity: i64,
    pub requirements: BTreeMap<String, String>,
    pub contact_info: String,
    pub created_at: DateTime<Utc>,
}

impl ExportOpportunity {
    /// Assign an identity to a draft opportunity.
    #[must_use]
    pub fn create(new: NewExportOpportunity, now: DateTime<Utc>) -> Self {
        Self {
            id: OpportunityId::new(),
            byproduct_type: new.byproduct_type,
            target_country: new.target_country,
            demand_level: new.demand_level,
            match_score: new.match_score,
            price_range: new.price_range,
            minimum_quantity: new.minimum_quantity,
            requirements: new.requirements,
            contact_info: new.contact_info,
            created_at: now,
        }
    }
}
