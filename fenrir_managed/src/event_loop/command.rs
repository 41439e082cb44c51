use crate::event_loop::GreetError;
use crate::greeter::GreeterHandle;

/// One-shot reply carrying either a result code or the reason it failed.
pub(crate) type ReplySender = tokio::sync::oneshot::Sender<Result<i64, GreetError>>;

/// Creates a reply channel for a single command.
pub(crate) fn get_reply_pair() -> (
    ReplySender,
    tokio::sync::oneshot::Receiver<Result<i64, GreetError>>,
) {
    tokio::sync::oneshot::channel()
}

/// Commands that can be sent to the event-loop.
#[derive(Debug)]
pub(crate) enum FenrirCommand {
    /// Print a greeting from the given greeter. Replies with the count
    /// that was printed.
    Hello {
        handle: GreeterHandle,
        reply_sender: ReplySender,
    },

    /// Create a fresh greeter, counting from 1. Replies with its handle.
    CreateGreeter { reply_sender: ReplySender },

    /// Release a greeter. Replies with 0.
    FreeGreeter {
        handle: GreeterHandle,
        reply_sender: ReplySender,
    },

    /// Replies with the count the greeter will print next.
    CallCount {
        handle: GreeterHandle,
        reply_sender: ReplySender,
    },

    /// Gracefully shut down the event-loop.
    Quit {
        reply_sender: tokio::sync::oneshot::Sender<()>,
    },
}
