use crate::event_loop::GreetError;
use crate::TYPE_NAME;
use log::warn;
use std::io::Write;
use std::sync::atomic::{AtomicI64, Ordering};

/// Strong type to wrap an i64 as a greeter handle.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub(crate) struct GreeterHandle(pub(crate) i64);

impl GreeterHandle {
    /// The process-wide greeter behind `hello` and `hello_void`.
    pub(crate) const DEFAULT: GreeterHandle = GreeterHandle(0);
}

/// Renders the greeting line (without the newline) for a given count.
pub(crate) fn format_greeting(count: i64) -> String {
    format!("Hello, world! from {TYPE_NAME} [count: {count}]")
}

/// An owned call counter. Each greeting prints the current count and
/// then moves it on by one.
#[derive(Debug)]
pub(crate) struct Greeter {
    next: AtomicI64,
}

impl Greeter {
    pub(crate) const fn new() -> Self {
        Self::starting_at(1)
    }

    pub(crate) const fn starting_at(first: i64) -> Self {
        Self {
            next: AtomicI64::new(first),
        }
    }

    /// The count the next greeting will print.
    pub(crate) fn next_count(&self) -> i64 {
        self.next.load(Ordering::SeqCst)
    }

    /// Writes one greeting line to `out` and returns the count it printed.
    ///
    /// The counter advances as soon as the whole line has been written, so
    /// a failed write can be retried with the same count and a printed count
    /// is never printed again. A failed flush after that is only logged,
    /// since the line has already left the greeter. Callers that share a
    /// greeter must serialize calls (the actor does this) to keep lines in
    /// count order.
    pub(crate) fn greet<W: Write + ?Sized>(&self, out: &mut W) -> Result<i64, GreetError> {
        let count = self.next_count();
        if count == i64::MAX {
            return Err(GreetError::CountOverflow);
        }
        let mut line = format_greeting(count);
        line.push('\n');
        out.write_all(line.as_bytes())?;
        self.next.fetch_add(1, Ordering::SeqCst);
        if let Err(e) = out.flush() {
            warn!("Greeting {count} was written but flushing failed: {e}");
        }
        Ok(count)
    }
}

impl Default for Greeter {
    fn default() -> Self {
        Self::new()
    }
}
