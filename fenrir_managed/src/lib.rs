#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]

//! A managed-style "Hello World" library with a C ABI, suitable for
//! loading from a native host. Each greeting prints
//! `Hello, world! from Lib [count: N]` and moves a call counter on by one.
//!
//! The exports are synchronous, but greetings are funnelled through a
//! single actor on a Tokio runtime running on its own thread. That way
//! any number of host threads can call in at once and the counts still
//! come out in order, with no gaps or duplicates. The runtime starts on
//! first use; `setup` and `shutdown` control it explicitly.

/// The maximum number of commands that can be queued up for processing.
const MAX_COMMANDS: usize = 100;

/// Worker threads for the Tokio runtime behind the event loop.
const WORKER_THREADS: usize = 2;

/// Name of the thread that owns the runtime.
const EVENT_LOOP_THREAD_NAME: &str = "fenrir_managed";

/// How many times an export will try to start the event loop before
/// giving up.
const SETUP_ATTEMPTS: u32 = 3;

/// The type name the greeting reports itself as.
const TYPE_NAME: &str = "Lib";

mod event_loop;
mod exports;
mod greeter;
mod greeter_handler;

pub use event_loop::{enable_logging, setup, shutdown};
pub use event_loop::{ErrorReportFn, GreetError, LifecycleStatus};
pub use exports::{create_greeter, free_greeter, greeter_call_count, greeter_hello};
pub use exports::{hello, hello_void};
