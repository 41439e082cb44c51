//! Module containing the greeting exports. These are using the C ABI and
//! are intended to be called from a native or managed host.

use crate::command_from_ffi;
use crate::event_loop::{request, ErrorReportFn, FenrirCommand};
use crate::greeter::GreeterHandle;
use log::error;

/// Prints `Hello, world! from Lib [count: N]` from the default greeter and
/// moves its count on by one.
///
/// Return values:
/// - 0 once the line has been written, -1 if it could not be.
#[no_mangle]
pub extern "C" fn hello() -> i32 {
    match request(|reply_sender| FenrirCommand::Hello {
        handle: GreeterHandle::DEFAULT,
        reply_sender,
    }) {
        Ok(_) => 0,
        Err(e) => {
            error!("hello failed: {e}");
            -1
        }
    }
}

/// The same greeting as [`hello`], for hosts that bind it as returning
/// nothing. Failures are only logged.
#[no_mangle]
pub extern "C" fn hello_void() {
    // `hello` has already logged any failure.
    _ = hello();
}

/// Create a new greeter with its own count, starting at 1. The handle is
/// reported through `reply_tx`.
#[no_mangle]
pub extern "C" fn create_greeter(reply_tx: ErrorReportFn) {
    command_from_ffi!(
        |reply_sender| FenrirCommand::CreateGreeter { reply_sender },
        "CreateGreeter",
        reply_tx
    );
}

/// Release a greeter created by [`create_greeter`]. Handle 0 (the default
/// greeter) can't be freed.
#[no_mangle]
pub extern "C" fn free_greeter(handle: i64, reply_tx: ErrorReportFn) {
    command_from_ffi!(
        |reply_sender| FenrirCommand::FreeGreeter {
            handle: GreeterHandle(handle),
            reply_sender,
        },
        "FreeGreeter",
        reply_tx
    );
}

/// Print a greeting from a specific greeter. The printed count is
/// reported through `reply_tx`.
#[no_mangle]
pub extern "C" fn greeter_hello(handle: i64, reply_tx: ErrorReportFn) {
    command_from_ffi!(
        |reply_sender| FenrirCommand::Hello {
            handle: GreeterHandle(handle),
            reply_sender,
        },
        "GreeterHello",
        reply_tx
    );
}

/// Report the count the greeter's next greeting will print.
#[no_mangle]
pub extern "C" fn greeter_call_count(handle: i64, reply_tx: ErrorReportFn) {
    command_from_ffi!(
        |reply_sender| FenrirCommand::CallCount {
            handle: GreeterHandle(handle),
            reply_sender,
        },
        "CallCount",
        reply_tx
    );
}
