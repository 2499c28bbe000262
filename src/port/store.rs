//! Store port for persistence operations.
//!
//! The computation layer is stateless; everything it produces is handed to
//! a `Store` implementation. Prediction and opportunity batches are inserted
//! together, but there is no transaction spanning multiple entity types and
//! no compensating rollback after a partial failure.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::domain::{
    ByproductType, DeviceId, DeviceReading, ExportOpportunity, IotDevice, PricePrediction,
    Product, ProductId, ProductUpdate, Transaction, TransactionId,
};
use crate::error::Result;

/// Storage operations for marketplace entities.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - Listing methods apply the fixed ordering and limits of the API surface
/// - Update methods return `None` when the target row does not exist
pub trait Store: Send + Sync {
    /// Save a product listing.
    fn save_product(&self, product: &Product) -> impl Future<Output = Result<()>> + Send;

    /// Get a product by ID.
    fn get_product(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>>> + Send;

    /// List all products, newest first.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>>> + Send;

    /// Apply a partial update. Returns the updated product, or `None` if absent.
    fn update_product(
        &self,
        id: &ProductId,
        update: ProductUpdate,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<Product>>> + Send;

    /// Delete a product by ID. Returns true if the product existed.
    fn delete_product(&self, id: &ProductId) -> impl Future<Output = Result<bool>> + Send;

    /// Save a transaction.
    fn save_transaction(&self, transaction: &Transaction)
        -> impl Future<Output = Result<()>> + Send;

    /// List all transactions, newest first.
    fn list_transactions(&self) -> impl Future<Output = Result<Vec<Transaction>>> + Send;

    /// Set a transaction's status, stamping `completed_at` when provided.
    /// Returns the updated transaction, or `None` if absent.
    fn set_transaction_status(
        &self,
        id: &TransactionId,
        status: &str,
        completed_at: Option<DateTime<Utc>>,
    ) -> impl Future<Output = Result<Option<Transaction>>> + Send;

    /// Save an IoT device.
    fn save_device(&self, device: &IotDevice) -> impl Future<Output = Result<()>> + Send;

    /// List all devices, newest first.
    fn list_devices(&self) -> impl Future<Output = Result<Vec<IotDevice>>> + Send;

    /// Replace a device's last reading. Returns the updated device, or `None`
    /// if absent.
    fn set_device_reading(
        &self,
        id: &DeviceId,
        reading: DeviceReading,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<IotDevice>>> + Send;

    /// Insert a prediction batch. All rows are inserted in one statement;
    /// a failure inserts nothing from the batch.
    fn save_predictions(
        &self,
        batch: &[PricePrediction],
    ) -> impl Future<Output = Result<()>> + Send;

    /// List predictions by most recent prediction date, optionally filtered by
    /// byproduct type (limit 30 filtered, 50 unfiltered).
    fn list_predictions(
        &self,
        byproduct: Option<&ByproductType>,
    ) -> impl Future<Output = Result<Vec<PricePrediction>>> + Send;

    /// Insert an opportunity batch in one statement.
    fn save_opportunities(
        &self,
        batch: &[ExportOpportunity],
    ) -> impl Future<Output = Result<()>> + Send;

    /// List opportunities by descending match score, optionally filtered by
    /// byproduct type (limit 20 unfiltered).
    fn list_opportunities(
        &self,
        byproduct: Option<&ByproductType>,
    ) -> impl Future<Output = Result<Vec<ExportOpportunity>>> + Send;
}
