//! Core types shared across Inverso facilities
//!
//! This crate provides foundational types used by the store, the journal
//! and the logging facility:
//!
//! - **Identity types**: StoreId, TransactionId
//! - **Schema constants**: Canonical field keys and event names

pub mod ids;
pub mod schema;

pub use ids::{StoreId, TransactionId};
