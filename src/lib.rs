//! Oilchain - Marketplace backend for oilseed processing byproducts.
//!
//! This crate provides a JSON API for trading byproducts (soymeal, oilseed
//! cakes, husk) with a derived-metrics computation layer on top of the
//! marketplace entities.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - **`domain`** - Entities and the four computation components
//!   - `forecast` - 14-day synthetic price predictions
//!   - `export` - Scoring against the fixed target-market table
//!   - `carbon` - Pure carbon-credit and circular-economy arithmetic
//!   - `sustainability` - Platform-wide aggregation and contributor tiers
//!
//! - **`port`** - The `Store` trait the computation layer persists through
//! - **`adapter`** - SQLite implementation of the store port
//! - **`api`** - Axum router and request handlers
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files, including reference
//!   table overrides
//! - [`domain`] - Marketplace entities and computation components
//! - [`error`] - Error types for the crate
//! - [`port`] - Persistence trait definitions
//! - [`adapter`] - Diesel/SQLite persistence
//! - [`api`] - HTTP surface
//! - [`app`] - Application orchestration

pub mod adapter;
pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
