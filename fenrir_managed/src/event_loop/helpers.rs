use crate::event_loop::command::{FenrirCommand, ReplySender};
use crate::event_loop::get_reply_pair;
use crate::event_loop::lifecycle::{command_sender, setup, LifecycleStatus};
use crate::event_loop::GreetError;
use crate::SETUP_ATTEMPTS;
use anyhow::Result;
use log::warn;

/// Send a command to the event loop. This is intended to be used by the
/// FFI-exposed API to submit calls for processing inside the tokio runtime.
///
/// If the event loop hasn't been initialized, this will cause it to be created.
///
/// # Arguments
///
/// * `command` - The command to send to the event loop.
pub(crate) fn send_command(command: FenrirCommand) -> Result<()> {
    let mut tries = 0;
    let sender = loop {
        if let Some(sender) = command_sender() {
            break sender;
        }
        tries += 1;
        if tries > SETUP_ATTEMPTS {
            return Err(anyhow::anyhow!("Event loop not started."));
        }
        if setup() != LifecycleStatus::Ok as i32 {
            warn!("Starting the event loop failed (attempt {tries}).");
            std::thread::sleep(std::time::Duration::from_millis(100));
        }
    };

    sender
        .blocking_send(command)
        .map_err(|e| anyhow::anyhow!("Error sending command: {e}"))
}

/// Submits a command built around a fresh reply channel and blocks until
/// the event loop answers.
pub(crate) fn request(
    command: impl FnOnce(ReplySender) -> FenrirCommand,
) -> Result<i64, GreetError> {
    let (reply_sender, reply_rx) = get_reply_pair();
    send_command(command(reply_sender)).map_err(|e| {
        warn!("{e}");
        GreetError::EventLoopUnavailable
    })?;
    reply_rx
        .blocking_recv()
        .map_err(|_| GreetError::ReplyDropped)?
}

/// Macro to send a command to the event loop, wait for completion and
/// hand the outcome to the caller's report callback. This pattern is
/// repeated in every handle-based export, so it's been abstracted into
/// a macro.
#[macro_export]
macro_rules! command_from_ffi {
    ($command: expr, $name: expr, $reply_sender: expr) => {
        let result = $crate::event_loop::request($command).map_err(|e| {
            log::warn!("{} failed: {}", $name, e);
            e.to_string()
        });
        $crate::event_loop::report_result(result, $reply_sender);
    };
}
