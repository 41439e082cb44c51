use std::cell::RefCell;
use std::ffi::{c_char, CStr};

thread_local! {
    static REPORTS: RefCell<Vec<(i64, Option<String>)>> = const { RefCell::new(Vec::new()) };
}

/// Report callback handed to the exports. They call it on the calling
/// thread, so a thread-local keeps parallel tests apart.
pub extern "C" fn record(code: i64, message: *const c_char) {
    let message = if message.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(message).to_string_lossy().to_string() })
    };
    REPORTS.with(|reports| reports.borrow_mut().push((code, message)));
}

/// Runs one export and returns the single report it produced.
pub fn reported(call: impl FnOnce()) -> (i64, Option<String>) {
    REPORTS.with(|reports| reports.borrow_mut().clear());
    call();
    REPORTS.with(|reports| {
        let mut reports = reports.borrow_mut();
        assert_eq!(reports.len(), 1, "expected exactly one report: {reports:?}");
        reports.remove(0)
    })
}

/// Like [`reported`], but the export must have succeeded.
pub fn reported_ok(call: impl FnOnce()) -> i64 {
    let (code, message) = reported(call);
    assert!(message.is_none(), "unexpected error: {message:?}");
    code
}
