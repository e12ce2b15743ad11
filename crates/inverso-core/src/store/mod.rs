//! Minimal hierarchical document store
//!
//! Specs live in an ordered map keyed by [`DocumentPath`](crate::model::DocumentPath).
//! Mutation hooks fire before each commit so a delegate can read the old
//! state.

pub mod delegate;
pub mod document;
pub mod layer;
pub mod registry;

pub use delegate::{StoreDelegate, StoreProxy};
pub use document::DocumentStore;
pub use layer::LayerData;
pub use registry::{StoreHandle, StoreRef, StoreRegistry};
