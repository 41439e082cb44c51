//! Bridging the host's threads and Rust's async runtime. The host calls
//! into synchronous exports; those submit commands to an event-loop
//! running on its own Tokio runtime and wait for the answer.

mod command;
mod errors;
mod helpers;
mod lifecycle;

use crate::greeter::Greeter;
use crate::greeter_handler::{GreeterActor, GreeterCommand};
use crate::MAX_COMMANDS;
use log::{debug, error};
use std::sync::{Arc, OnceLock};
use tokio::sync::mpsc::{channel, Sender};

pub(crate) use command::{get_reply_pair, FenrirCommand, ReplySender};
pub use errors::{ErrorReportFn, GreetError};
pub(crate) use errors::report_result;
pub(crate) use helpers::request;
pub use lifecycle::{enable_logging, setup, shutdown, LifecycleStatus};

/// The greeter behind handle 0. It lives for the whole process, so its
/// count survives event-loop restarts.
static DEFAULT_GREETER: OnceLock<Arc<Greeter>> = OnceLock::new();

pub(crate) fn default_greeter() -> Arc<Greeter> {
    DEFAULT_GREETER
        .get_or_init(|| Arc::new(Greeter::new()))
        .clone()
}

/// Stops the greeter actor and waits until it has drained its queue.
async fn stop_greeters(greeters: &Sender<GreeterCommand>) {
    let (done_sender, done) = tokio::sync::oneshot::channel();
    forward(greeters, GreeterCommand::Quit { done_sender }).await;
    if done.await.is_err() {
        error!("Greeter actor stopped without acknowledging.");
    }
}

async fn forward(greeters: &Sender<GreeterCommand>, command: GreeterCommand) {
    if let Err(e) = greeters.send(command).await {
        error!("Greeter actor is gone: {e:?}");
    }
}

/// Runs until a `Quit` arrives. The command sender is handed back through
/// `ready_tx` once everything is started.
async fn event_loop(ready_tx: tokio::sync::oneshot::Sender<Sender<FenrirCommand>>) {
    let (tx, mut rx) = channel::<FenrirCommand>(MAX_COMMANDS);

    let greeters = GreeterActor::start(default_greeter(), std::io::stdout()).await;

    if ready_tx.send(tx).is_err() {
        error!("Nobody is waiting for the event loop to start.");
        stop_greeters(&greeters).await;
        return;
    }

    let mut quit_sender = None;
    while let Some(command) = rx.recv().await {
        debug!("Event loop received {command:?}");
        // Forwarded in arrival order, so greetings print in submission order.
        match command {
            FenrirCommand::Hello {
                handle,
                reply_sender,
            } => {
                forward(&greeters, GreeterCommand::Greet { handle, reply_sender }).await;
            }
            FenrirCommand::CreateGreeter { reply_sender } => {
                forward(&greeters, GreeterCommand::NewGreeter { reply_sender }).await;
            }
            FenrirCommand::FreeGreeter {
                handle,
                reply_sender,
            } => {
                forward(&greeters, GreeterCommand::FreeGreeter { handle, reply_sender }).await;
            }
            FenrirCommand::CallCount {
                handle,
                reply_sender,
            } => {
                forward(&greeters, GreeterCommand::CallCount { handle, reply_sender }).await;
            }
            FenrirCommand::Quit { reply_sender } => {
                stop_greeters(&greeters).await;
                quit_sender = Some(reply_sender);
                break;
            }
        }
    }
    debug!("Event loop shutting down.");
    if let Some(sender) = quit_sender {
        if let Err(e) = sender.send(()) {
            error!("Error sending quit response: {:?}", e);
        }
    }
}
