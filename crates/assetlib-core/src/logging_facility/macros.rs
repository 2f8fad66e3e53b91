//! Operation lifecycle macros.
//!
//! A logged operation emits one `start` event and then exactly one `end` or
//! `end_error` event, all carrying the same `op`. `component` is the module
//! path of the call site. Extra `key = value` fields are passed through to
//! `tracing` unchanged.

/// Emit the `start` event of `op` at info level.
///
/// ```
/// # use assetlib_core::log_op_start;
/// log_op_start!("reconcile");
/// log_op_start!("reconcile", asset_kind = "images", current_len = 12u64);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = assetlib_core_types::schema::EVENT_START,
            $($($field)*)?
        )
    };
}

/// Emit the `end` event of `op`; `duration_ms` is required.
///
/// ```
/// # use assetlib_core::log_op_end;
/// log_op_end!("reconcile", duration_ms = 3u64, added = 1u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = assetlib_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        )
    };
}

/// Emit the `end_error` event of `op` at error level.
///
/// `$err` is anything that converts into
/// [`ExError`](crate::errors::ExError); its kind, stable code and message
/// become the `err_kind`, `err_code` and `err_message` fields.
///
/// ```
/// # use assetlib_core::log_op_error;
/// # use assetlib_core::errors::AssetLibError;
/// let err = AssetLibError::InvalidInput { reason: "empty renditions root".to_string() };
/// log_op_error!("reconcile", err, duration_ms = 0u64);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = assetlib_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_message = ex_err.message(),
            $($($field)*)?
        )
    }};
}
