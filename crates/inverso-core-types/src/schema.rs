//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_TRANSACTION_ID: &str = "transaction_id";

// Entity identifiers
pub const FIELD_STORE_ID: &str = "store_id";
pub const FIELD_PATH: &str = "path";
pub const FIELD_FIELD: &str = "field";

// Journal state
pub const FIELD_DEPTH: &str = "depth";
pub const FIELD_MUTE_DEPTH: &str = "mute_depth";
pub const FIELD_LOG_LEN: &str = "log_len";
pub const FIELD_EDIT_KIND: &str = "edit_kind";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_PERF_WARNING: &str = "perf_warning";
pub const EVENT_CODING_ERROR: &str = "coding_error";
