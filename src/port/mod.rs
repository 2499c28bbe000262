//! Trait definitions at the seams of the system.

pub mod store;

pub use store::Store;
