//! Recording and replay of inverse edits
//!
//! - [`EditRecorder`]: per-thread nesting and mute state
//! - [`TransactionBlock`]: RAII scope that packages a log at the outermost close
//! - [`EditLog`]: move-only inverse of one transaction; `invert()` swaps it
//!   into its own opposite
//! - [`EditNotifier`]: broadcast of finalized logs

pub mod log;
pub mod notify;
pub mod recorder;
pub mod transaction;

pub use log::{EditLog, EditLogHandle};
pub use notify::{EditNotifier, SubscriptionId};
pub use recorder::{EditRecorder, MuteGuard};
pub use transaction::TransactionBlock;
