use crate::event_loop::{GreetError, ReplySender};
use crate::greeter::{Greeter, GreeterHandle};
use log::{debug, warn};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc::Sender;

#[derive(Debug)]
pub(crate) enum GreeterCommand {
    Greet {
        handle: GreeterHandle,
        reply_sender: ReplySender,
    },
    NewGreeter {
        reply_sender: ReplySender,
    },
    FreeGreeter {
        handle: GreeterHandle,
        reply_sender: ReplySender,
    },
    CallCount {
        handle: GreeterHandle,
        reply_sender: ReplySender,
    },
    Quit {
        done_sender: tokio::sync::oneshot::Sender<()>,
    },
}

fn send_reply(reply_sender: ReplySender, result: Result<i64, GreetError>) {
    if let Err(e) = reply_sender.send(result) {
        warn!("Greeter reply went unread: {e:?}");
    }
}

/// Owns every greeter and the output they print to. Greetings are handled
/// one at a time, so each line is written whole and counts never collide.
pub(crate) struct GreeterActor;

impl GreeterActor {
    pub(crate) async fn start<W>(default_greeter: Arc<Greeter>, mut out: W) -> Sender<GreeterCommand>
    where
        W: Write + Send + 'static,
    {
        let (tx, mut rx) = tokio::sync::mpsc::channel(128);
        tokio::spawn(async move {
            let mut next_handle = 1_i64;
            let mut greeters = HashMap::new();
            greeters.insert(GreeterHandle::DEFAULT, default_greeter);

            while let Some(command) = rx.recv().await {
                match command {
                    GreeterCommand::Greet {
                        handle,
                        reply_sender,
                    } => {
                        let result = match greeters.get(&handle) {
                            Some(greeter) => greeter.greet(&mut out),
                            None => Err(GreetError::UnknownHandle(handle.0)),
                        };
                        send_reply(reply_sender, result);
                    }
                    GreeterCommand::NewGreeter { reply_sender } => {
                        let handle = GreeterHandle(next_handle);
                        next_handle += 1;
                        greeters.insert(handle, Arc::new(Greeter::new()));
                        debug!("Created greeter {}", handle.0);
                        send_reply(reply_sender, Ok(handle.0));
                    }
                    GreeterCommand::FreeGreeter {
                        handle,
                        reply_sender,
                    } => {
                        let result = if handle == GreeterHandle::DEFAULT {
                            Err(GreetError::DefaultGreeterIsPermanent)
                        } else if greeters.remove(&handle).is_some() {
                            debug!("Freed greeter {}", handle.0);
                            Ok(0)
                        } else {
                            Err(GreetError::UnknownHandle(handle.0))
                        };
                        send_reply(reply_sender, result);
                    }
                    GreeterCommand::CallCount {
                        handle,
                        reply_sender,
                    } => {
                        let result = greeters
                            .get(&handle)
                            .map(|greeter| greeter.next_count())
                            .ok_or(GreetError::UnknownHandle(handle.0));
                        send_reply(reply_sender, result);
                    }
                    GreeterCommand::Quit { done_sender } => {
                        debug!("Greeter actor stopping with {} greeters.", greeters.len());
                        let _ = done_sender.send(());
                        break;
                    }
                }
            }
        });
        tx
    }
}
