//! Structured event macros
//!
//! Every event carries `component` (the calling module), `op` and `event`
//! from [`inverso_core_types::schema`]; extra `key = value` fields follow in
//! `tracing` syntax. Callers need no direct `tracing` dependency.

/// Shared body of the public macros
#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($level:ident, $op:expr, $event:ident $(, $($field:tt)*)?) => {
        $crate::__tracing::event!(
            $crate::__tracing::Level::$level,
            component = module_path!(),
            op = $op,
            event = $crate::__types::schema::$event,
            $($($field)*)?
        )
    };
}

/// Operation started
///
/// ```
/// # use inverso_core::log_op_start;
/// log_op_start!("invert");
/// log_op_start!("invert", log_len = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_event!(INFO, $op, EVENT_START $(, $($field)*)?)
    };
}

/// Operation finished; `duration_ms` is required
///
/// ```
/// # use inverso_core::log_op_end;
/// log_op_end!("invert", duration_ms = 42);
/// log_op_end!("invert", duration_ms = 42, success = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_event!(INFO, $op, EVENT_END, duration_ms = $duration $(, $($field)*)?)
    };
}

/// Operation failed with anything convertible into an
/// [`ExError`](crate::errors::ExError); logs its kind and stable code
///
/// ```
/// # use inverso_core::{log_op_error, errors::InversoError};
/// let err = InversoError::SpecNotFound { path: "/A".to_string() };
/// log_op_error!("delete_spec", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_event!(
            ERROR,
            $op,
            EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}

/// An edit that cannot be undone, such as a store mutation while recording
/// is muted
///
/// ```
/// # use inverso_core::log_perf_warning;
/// log_perf_warning!("record", "edit submitted while muted");
/// ```
#[macro_export]
macro_rules! log_perf_warning {
    ($op:expr, $msg:expr $(, $($field:tt)*)?) => {
        $crate::__log_event!(
            WARN,
            $op,
            EVENT_PERF_WARNING,
            err.code = $crate::errors::ExErrorKind::PerformanceWarning.code(),
            message = $msg
            $(, $($field)*)?
        )
    };
}

/// Misuse of the journal API; the operation does not proceed
///
/// ```
/// # use inverso_core::{log_coding_error, errors::InversoError};
/// log_coding_error!("invert", InversoError::InvertInsideTransaction { depth: 1 });
/// ```
#[macro_export]
macro_rules! log_coding_error {
    ($op:expr, $err:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_event!(
            ERROR,
            $op,
            EVENT_CODING_ERROR,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            message = %ex_err
            $(, $($field)*)?
        )
    }};
}
