//! Error types and the callback used to hand results back across the
//! FFI boundary.

use std::ffi::{c_char, CString};
use thiserror::Error;

/// Type signature for error reporting callbacks.
///
/// On success the callback receives the result code and a null message.
/// On failure it receives `-1` and a message that is only valid for the
/// duration of the call.
pub type ErrorReportFn = extern "C" fn(i64, *const c_char);

/// Everything that can go wrong between an export and the greeter actor.
#[derive(Debug, Error)]
pub enum GreetError {
    /// Writing the greeting to the output failed.
    #[error("Could not write greeting: {0}")]
    Write(#[from] std::io::Error),

    /// The count can't advance past `i64::MAX`, so nothing is printed.
    #[error("Greeter count is exhausted.")]
    CountOverflow,

    /// No greeter is registered under the handle.
    #[error("Greeter handle {0} not found.")]
    UnknownHandle(i64),

    /// Handle 0 backs the argument-less exports and is never released.
    #[error("The default greeter cannot be freed.")]
    DefaultGreeterIsPermanent,

    /// The event loop isn't running and couldn't be started.
    #[error("Event loop is not available.")]
    EventLoopUnavailable,

    /// The event loop went away before answering.
    #[error("Event loop dropped the reply.")]
    ReplyDropped,
}

/// Utilize the error reporting callback to report a result.
pub(crate) fn report_result(result: Result<i64, String>, target: ErrorReportFn) {
    match result {
        Ok(code) => {
            target(code, std::ptr::null());
        }
        Err(error) => {
            // Interior NULs would truncate the message on the other side.
            let error_string = CString::new(error.replace('\0', " ")).unwrap_or_default();
            target(-1, error_string.as_ptr());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::ffi::CStr;
    use std::sync::Mutex;

    static REPORTS: Mutex<Vec<(i64, Option<String>)>> = Mutex::new(Vec::new());

    extern "C" fn record(code: i64, message: *const c_char) {
        let message = if message.is_null() {
            None
        } else {
            Some(unsafe { CStr::from_ptr(message).to_string_lossy().to_string() })
        };
        REPORTS.lock().unwrap().push((code, message));
    }

    #[test]
    fn reports_success_and_failure() {
        report_result(Ok(12), record);
        report_result(Err(GreetError::UnknownHandle(9).to_string()), record);
        report_result(Err("bad\0message".to_string()), record);

        let reports = REPORTS.lock().unwrap();
        assert_eq!(reports[0], (12, None));
        assert_eq!(
            reports[1],
            (-1, Some("Greeter handle 9 not found.".to_string()))
        );
        assert_eq!(reports[2], (-1, Some("bad message".to_string())));
    }
}
