//! Marketplace domain logic and the derived-metrics computation layer.
//!
//! The computation components (forecast, export, carbon, sustainability)
//! are stateless: they read the injected [`tables::ReferenceTables`] and a
//! caller-supplied entity, and return plain data for the persistence layer.

mod byproduct;
mod device;
mod id;
mod opportunity;
mod prediction;
mod product;
mod rounding;
mod transaction;

pub mod carbon;
pub mod export;
pub mod forecast;
pub mod quality;
pub mod sustainability;
pub mod tables;

// Core domain types
pub use byproduct::ByproductType;
pub use device::{DeviceReading, IotDevice, NewIotDevice};
pub use id::{DeviceId, OpportunityId, PredictionId, ProductId, TransactionId};
pub use opportunity::{ExportOpportunity, NewExportOpportunity};
pub use prediction::{
    NewPricePrediction, PredictionFactors, PricePrediction, Seasonality, SupplyLevel,
};
pub use product::{NewProduct, Product, ProductUpdate, QualityGrade};
pub use tables::{DemandLevel, ReferenceTables, TargetMarket};
pub use transaction::{NewTransaction, Transaction};
