//! SQLite marketplace store implementation.
//!
//! Implements the [`Store`] port over Diesel and a pooled SQLite database.
//! Batch saves use a single multi-row insert; there is no transaction
//! spanning multiple entity types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use super::connection::DbPool;
use super::model::{
    ExportOpportunityRow, IotDeviceRow, PricePredictionRow, ProductRow, TransactionRow,
};
use super::schema::{export_opportunities, iot_devices, price_predictions, products, transactions};
use crate::domain::{
    ByproductType, DemandLevel, DeviceId, DeviceReading, ExportOpportunity, IotDevice,
    PricePrediction, Product, ProductId, ProductUpdate, Transaction, TransactionId,
};
use crate::error::{Error, Result};
use crate::port::Store;

/// SQLite-backed marketplace store.
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>> {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }
}

fn parse_decimal(value: &str) -> Result<Decimal> {
    value
        .parse::<Decimal>()
        .map_err(|e| Error::Parse(e.to_string()))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Parse(e.to_string()))
}

fn product_to_row(product: &Product) -> Result<ProductRow> {
    Ok(ProductRow {
        id: product.id.to_string(),
        seller_id: product.seller_id.clone(),
        title: product.title.clone(),
        byproduct_type: product.byproduct_type.as_str().to_string(),
        quantity: product.quantity,
        price_per_kg: product.price_per_kg.to_string(),
        quality_grade: product.quality_grade.as_str().to_string(),
        quality_metrics: serde_json::to_string(&product.quality_metrics)?,
        location: product.location.clone(),
        description: product.description.clone(),
        certifications: serde_json::to_string(&product.certifications)?,
        available_for_export: product.available_for_export,
        status: product.status.clone(),
        image_url: product.image_url.clone(),
        created_at: product.created_at.to_rfc3339(),
        updated_at: product.updated_at.to_rfc3339(),
    })
}

fn product_from_row(row: ProductRow) -> Result<Product> {
    Ok(Product {
        id: ProductId::from(row.id),
        seller_id: row.seller_id,
        title: row.title,
        byproduct_type: ByproductType::from(row.byproduct_type),
        quantity: row.quantity,
        price_per_kg: parse_decimal(&row.price_per_kg)?,
        quality_grade: row.quality_grade.into(),
        quality_metrics: serde_json::from_str(&row.quality_metrics)?,
        location: row.location,
        description: row.description,
        certifications: serde_json::from_str(&row.certifications)?,
        available_for_export: row.available_for_export,
        status: row.status,
        image_url: row.image_url,
        created_at: parse_timestamp(&row.created_at)?,
        updated_at: parse_timestamp(&row.updated_at)?,
    })
}

fn transaction_to_row(transaction: &Transaction) -> TransactionRow {
    TransactionRow {
        id: transaction.id.to_string(),
        product_id: transaction.product_id.to_string(),
        buyer_id: transaction.buyer_id.clone(),
        seller_id: transaction.seller_id.clone(),
        quantity: transaction.quantity,
        total_price: transaction.total_price.to_string(),
        status: transaction.status.clone(),
        smart_contract_hash: transaction.smart_contract_hash.clone(),
        delivery_terms: transaction.delivery_terms.clone(),
        payment_terms: transaction.payment_terms.clone(),
        carbon_credits: transaction.carbon_credits.map(|c| c.to_string()),
        created_at: transaction.created_at.to_rfc3339(),
        completed_at: transaction.completed_at.map(|t| t.to_rfc3339()),
    }
}

fn transaction_from_row(row: TransactionRow) -> Result<Transaction> {
    Ok(Transaction {
        id: TransactionId::from(row.id),
        product_id: ProductId::from(row.product_id),
        buyer_id: row.buyer_id,
        seller_id: row.seller_id,
        quantity: row.quantity,
        total_price: parse_decimal(&row.total_price)?,
        status: row.status,
        smart_contract_hash: row.smart_contract_hash,
        delivery_terms: row.delivery_terms,
        payment_terms: row.payment_terms,
        carbon_credits: row
            .carbon_credits
            .as_deref()
            .map(parse_decimal)
            .transpose()?,
        created_at: parse_timestamp(&row.created_at)?,
        completed_at: row.completed_at.as_deref().map(parse_timestamp).transpose()?,
    })
}

fn device_to_row(device: &IotDevice) -> Result<IotDeviceRow> {
    Ok(IotDeviceRow {
        id: device.id.to_string(),
        owner_id: device.owner_id.clone(),
        device_name: device.device_name.clone(),
        device_type: device.device_type.clone(),
        location: device.location.clone(),
        status: device.status.clone(),
        last_reading: device
            .last_reading
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?,
        battery_level: device.battery_level,
        created_at: device.created_at.to_rfc3339(),
        updated_at: device.updated_at.to_rfc3339(),
    })
}

fn device_from_row(row: IotDeviceRow) -> Result<IotDevice> {
    Ok(IotDevice {
        id: DeviceId::from(row.id),
        owner_id: row.owner_id,
        device_name: row.device_name,
        device_type: row.device_type,
        location: row.location,
        status: row.status,
        last_reading: row
            .last_reading
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?,
        battery_level: row.battery_level,
        created_at: parse_timestamp(&row.created_at)?,
        updated_at: parse_timestamp(&row.updated_at)?,
    })
}

fn prediction_to_row(prediction: &PricePrediction) -> Result<PricePredictionRow> {
    Ok(PricePredictionRow {
        id: prediction.id.to_string(),
        byproduct_type: prediction.byproduct_type.as_str().to_string(),
        current_price: prediction.current_price.to_string(),
        predicted_price: prediction.predicted_price.to_string(),
        prediction_date: prediction.prediction_date.to_rfc3339(),
        confidence: prediction.confidence.to_string(),
        factors: serde_json::to_string(&prediction.factors)?,
        created_at: prediction.created_at.to_rfc3339(),
    })
}

fn prediction_from_row(row: PricePredictionRow) -> Result<PricePrediction> {
    Ok(PricePrediction {
        id: row.id.into(),
        byproduct_type: ByproductType::from(row.byproduct_type),
        current_price: parse_decimal(&row.current_price)?,
        predicted_price: parse_decimal(&row.predicted_price)?,
        prediction_date: parse_timestamp(&row.prediction_date)?,
        confidence: parse_decimal(&row.confidence)?,
        factors: serde_json::from_str(&row.factors)?,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

fn opportunity_to_row(opportunity: &ExportOpportunity) -> Result<ExportOpportunityRow> {
    Ok(ExportOpportunityRow {
        id: opportunity.id.to_string(),
        byproduct_type: opportunity.byproduct_type.as_str().to_string(),
        target_country: opportunity.target_country.clone(),
        demand_level: opportunity.demand_level.as_str().to_string(),
        match_score: opportunity.match_score,
        price_range: opportunity.price_range.clone(),
        minimum_quantity: opportunity.minimum_quantity,
        requirements: serde_json::to_string(&opportunity.requirements)?,
        contact_info: opportunity.contact_info.clone(),
        created_at: opportunity.created_at.to_rfc3339(),
    })
}

fn opportunity_from_row(row: ExportOpportunityRow) -> Result<ExportOpportunity> {
    let demand_level = DemandLevel::parse(&row.demand_level)
        .ok_or_else(|| Error::Parse(format!("unknown demand level: {}", row.demand_level)))?;
    Ok(ExportOpportunity {
        id: row.id.into(),
        byproduct_type: ByproductType::from(row.byproduct_type),
        target_country: row.target_country,
        demand_level,
        match_score: row.match_score,
        price_range: row.price_range,
        minimum_quantity: row.minimum_quantity,
        requirements: serde_json::from_str(&row.requirements)?,
        contact_info: row.contact_info,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

impl Store for SqliteStore {
    async fn save_product(&self, product: &Product) -> Result<()> {
        let row = product_to_row(product)?;
        let mut conn = self.conn()?;

        diesel::replace_into(products::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>> {
        let mut conn = self.conn()?;

        let row: Option<ProductRow> = products::table
            .find(id.to_string())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(product_from_row).transpose()
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let mut conn = self.conn()?;

        let rows: Vec<ProductRow> = products::table
            .order(products::created_at.desc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(product_from_row).collect()
    }

    async fn update_product(
        &self,
        id: &ProductId,
        update: ProductUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Product>> {
        let Some(mut product) = self.get_product(id).await? else {
            return Ok(None);
        };
        product.apply_update(update, now);
        self.save_product(&product).await?;
        Ok(Some(product))
    }

    async fn delete_product(&self, id: &ProductId) -> Result<bool> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(products::table.find(id.to_string()))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted > 0)
    }

    async fn save_transaction(&self, transaction: &Transaction) -> Result<()> {
        let row = transaction_to_row(transaction);
        let mut conn = self.conn()?;

        diesel::replace_into(transactions::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let mut conn = self.conn()?;

        let rows: Vec<TransactionRow> = transactions::table
            .order(transactions::created_at.desc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(transaction_from_row).collect()
    }

    async fn set_transaction_status(
        &self,
        id: &TransactionId,
        status: &str,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Transaction>> {
        let mut conn = self.conn()?;

        let row: Option<TransactionRow> = transactions::table
            .find(id.to_string())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut transaction = transaction_from_row(row)?;
        transaction.status = status.to_string();
        if let Some(completed_at) = completed_at {
            transaction.completed_at = Some(completed_at);
        }

        diesel::replace_into(transactions::table)
            .values(&transaction_to_row(&transaction))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Some(transaction))
    }

    async fn save_device(&self, device: &IotDevice) -> Result<()> {
        let row = device_to_row(device)?;
        let mut conn = self.conn()?;

        diesel::replace_into(iot_devices::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_devices(&self) -> Result<Vec<IotDevice>> {
        let mut conn = self.conn()?;

        let rows: Vec<IotDeviceRow> = iot_devices::table
            .order(iot_devices::created_at.desc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(device_from_row).collect()
    }

    async fn set_device_reading(
        &self,
        id: &DeviceId,
        reading: DeviceReading,
        now: DateTime<Utc>,
    ) -> Result<Option<IotDevice>> {
        let mut conn = self.conn()?;

        let row: Option<IotDeviceRow> = iot_devices::table
            .find(id.to_string())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut device = device_from_row(row)?;
        device.record_reading(reading, now);

        diesel::replace_into(iot_devices::table)
            .values(&device_to_row(&device)?)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(Some(device))
    }

    async fn save_predictions(&self, batch: &[PricePrediction]) -> Result<()> {
        let rows: Vec<PricePredictionRow> =
            batch.iter().map(prediction_to_row).collect::<Result<_>>()?;
        let mut conn = self.conn()?;

        diesel::insert_into(price_predictions::table)
            .values(&rows)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_predictions(
        &self,
        byproduct: Option<&ByproductType>,
    ) -> Result<Vec<PricePrediction>> {
        let mut conn = self.conn()?;

        let rows: Vec<PricePredictionRow> = match byproduct {
            Some(byproduct) => price_predictions::table
                .filter(price_predictions::byproduct_type.eq(byproduct.as_str()))
                .order(price_predictions::prediction_date.desc())
                .limit(30)
                .load(&mut conn)
                .map_err(|e| Error::Database(e.to_string()))?,
            None => price_predictions::table
                .order(price_predictions::prediction_date.desc())
                .limit(50)
                .load(&mut conn)
                .map_err(|e| Error::Database(e.to_string()))?,
        };

        rows.into_iter().map(prediction_from_row).collect()
    }

    async fn save_opportunities(&self, batch: &[ExportOpportunity]) -> Result<()> {
        let rows: Vec<ExportOpportunityRow> =
            batch.iter().map(opportunity_to_row).collect::<Result<_>>()?;
        let mut conn = self.conn()?;

        diesel::insert_into(export_opportunities::table)
            .values(&rows)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_opportunities(
        &self,
        byproduct: Option<&ByproductType>,
    ) -> Result<Vec<ExportOpportunity>> {
        let mut conn = self.conn()?;

        let rows: Vec<ExportOpportunityRow> = match byproduct {
            Some(byproduct) => export_opportunities::table
                .filter(export_opportunities::byproduct_type.eq(byproduct.as_str()))
                .order(export_opportunities::match_score.desc())
                .load(&mut conn)
                .map_err(|e| Error::Database(e.to_string()))?,
            None => export_opportunities::table
                .order(export_opportunities::match_score.desc())
                .limit(20)
                .load(&mut conn)
                .map_err(|e| Error::Database(e.to_string()))?,
        };

        rows.into_iter().map(opportunity_from_row).collect()
    }
}
