//! HTTP API surface.
//!
//! Thin handlers over the store port and the computation components. All
//! request and response bodies are camelCase JSON; there is no auth layer.

mod devices;
mod error;
mod opportunities;
mod predictions;
mod products;
mod sustainability;
mod transactions;

pub use error::ApiError;

use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domain::tables::ReferenceTables;
use crate::port::Store;

/// Shared state handed to every handler.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub tables: Arc<ReferenceTables>,
}

impl<S> AppState<S> {
    pub fn new(store: S, tables: ReferenceTables) -> Self {
        Self {
            store: Arc::new(store),
            tables: Arc::new(tables),
        }
    }
}

// Manual impl: `S` itself need not be `Clone` behind the `Arc`s.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            tables: Arc::clone(&self.tables),
        }
    }
}

/// Build the application router over any store implementation.
pub fn router<S: Store + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(products::list::<S>).post(products::create::<S>),
        )
        .route(
            "/api/products/:id",
            patch(products::update::<S>).delete(products::remove::<S>),
        )
        .route(
            "/api/transactions",
            get(transactions::list::<S>).post(transactions::create::<S>),
        )
        .route(
            "/api/transactions/:id",
            patch(transactions::set_status::<S>),
        )
        .route(
            "/api/iot-devices",
            get(devices::list::<S>).post(devices::create::<S>),
        )
        .route(
            "/api/iot-devices/:id/reading",
            patch(devices::set_reading::<S>),
        )
        .route("/api/price-predictions", get(predictions::list::<S>))
        .route(
            "/api/price-predictions/generate",
            post(predictions::generate::<S>),
        )
        .route("/api/export-opportunities", get(opportunities::list::<S>))
        .route(
            "/api/export-opportunities/generate",
            post(opportunities::generate::<S>),
        )
        .route("/api/sustainability/report", get(sustainability::report::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
