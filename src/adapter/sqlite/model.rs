//! Database model types for Diesel ORM.
//!
//! Decimals and timestamps are stored as TEXT, structured fields as JSON
//! strings. Conversions to and from domain types live in the store.

use diesel::prelude::*;

use super::schema::{export_opportunities, iot_devices, price_predictions, products, transactions};

/// Database row for a product listing.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductRow {
    pub id: String,
    pub seller_id: String,
    pub title: String,
    pub byproduct_type: String,
    pub quantity: i64,
    pub price_per_kg: String,
    pub quality_grade: String,
    pub quality_metrics: String,
    pub location: String,
    pub description: Option<String>,
    pub certifications: String,
    pub available_for_export: bool,
    pub status: String,
    pub image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Database row for a transaction.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionRow {
    pub id: String,
    pub product_id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub quantity: i64,
    pub total_price: String,
    pub status: String,
    pub smart_contract_hash: Option<String>,
    pub delivery_terms: Option<String>,
    pub payment_terms: Option<String>,
    pub carbon_credits: Option<String>,
    pub created_at: String,
    pub completed_at: Option<String>,
}

/// Database row for an IoT device.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = iot_devices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IotDeviceRow {
    pub id: String,
    pub owner_id: String,
    pub device_name: String,
    pub device_type: String,
    pub location: String,
    pub status: String,
    pub last_reading: Option<String>,
    pub battery_level: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

/// Database row for a price prediction.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = price_predictions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PricePredictionRow {
    pub id: String,
    pub byproduct_type: String,
    pub current_price: String,
    pub predicted_price: String,
    pub prediction_date: String,
    pub confidence: String,
    pub factors: String,
    pub created_at: String,
}

/// Database row for an export opportunity.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = export_opportunities)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExportOpportunityRow {
    pub id: String,
    pub byproduct_type: String,
    pub target_country: String,
    pub demand_level: String,
    pub match_score: i64,
    pub price_range: String,
    pub minimum_quantity: i64,
    pub requirements: String,
    pub contact_info: String,
    pub created_at: String,
}
