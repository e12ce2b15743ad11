//! Inverso Core - edit inversion and undo journal
//!
//! Every mutation of a [`DocumentStore`] is intercepted and turned into a
//! reversible [`EditOp`]. Ops recorded inside a [`TransactionBlock`] form an
//! [`EditLog`]; inverting the log restores the prior state and leaves the
//! log holding the opposite-direction sequence, so undo and redo are the
//! same call.
//!
//! ```
//! use inverso_core::{open_store, DocumentPath, SpecType, Token, TransactionBlock, Value};
//!
//! let store = open_store();
//! let path = DocumentPath::parse("/A").unwrap();
//! let foo = Token::from("foo");
//!
//! let block = TransactionBlock::new();
//! store.borrow_mut().create_spec(&path, SpecType::Prim).unwrap();
//! store.borrow_mut().set_field(&path, &foo, Value::Int(1)).unwrap();
//! let handle = block.close().unwrap();
//!
//! assert!(handle.invert());
//! assert!(!store.borrow().has_spec(&path));
//! assert!(handle.invert());
//! assert_eq!(store.borrow().get_field(&path, &foo), Some(&Value::Int(1)));
//! ```

pub mod edit;
pub mod errors;
pub mod intercept;
pub mod journal;
pub mod logging_facility;
pub mod model;
pub mod store;

// Re-export commonly used types
pub use edit::{DeletedSubtreeSnapshot, EditKind, EditOp};
pub use errors::{ExError, ExErrorKind, InversoError, Result};
pub use intercept::{open_store, InterceptionDelegate};
pub use journal::{EditLog, EditLogHandle, EditNotifier, EditRecorder, TransactionBlock};
pub use model::{ChildValue, DocumentPath, FieldKey, SpecData, SpecType, TimeCode, Token, Value};
pub use store::{DocumentStore, StoreDelegate, StoreHandle, StoreRef, StoreRegistry};

// Paths used by the logging macros
#[doc(hidden)]
pub use inverso_core_types as __types;
#[doc(hidden)]
pub use tracing as __tracing;
