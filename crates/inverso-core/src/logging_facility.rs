//! Logging for the journal and the engine
//!
//! Events are plain `tracing` events with a fixed set of keys (see
//! [`inverso_core_types::schema`]) so log lines from `invert`, transaction
//! close and the undo stack can be filtered and correlated by `op`,
//! `store_id` and `transaction_id`.
//!
//! Applications call [`init`] once; tests install [`init_test_capture`]
//! instead and assert on the captured events.
//!
//! ```rust
//! use inverso_core::logging_facility::{init, Profile};
//!
//! init(Profile::Production);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
