//! Reversible edit operations
//!
//! Each variant of [`EditOp`] captures the state a store mutation is
//! about to overwrite and knows how to write it back.

pub mod child_list;
pub mod field;
pub mod op;
pub mod spec;
pub mod time_sample;

pub use child_list::{ChildAction, ChildListEdit};
pub use field::{DictKey, DictValueEdits, FieldEdits};
pub use op::{EditKind, EditOp};
pub use spec::{DeletedSubtreeSnapshot, SpecChange, SpecLifecycleEdit};
pub use time_sample::TimeSampleEdits;

use inverso_core_types::StoreId;

use crate::errors::{ExError, InversoError};

/// Ops never fail loudly: a failed restore is logged and reported as `false`
pub(crate) fn warn_restore_failure(store_id: &StoreId, kind: EditKind, err: InversoError) {
    let ex: ExError = err.into();
    tracing::warn!(
        component = module_path!(),
        op = "apply",
        store_id = %store_id,
        edit_kind = kind.as_str(),
        err.kind = ?ex.kind(),
        err.code = ex.code(),
        message = %ex,
    );
}
