use crate::event_loop::command::FenrirCommand;
use crate::event_loop::event_loop;
use crate::{EVENT_LOOP_THREAD_NAME, WORKER_THREADS};
use log::{debug, error, warn};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use strum::FromRepr;
use tokio::sync::mpsc::Sender;

/// This enum represents the possible outcomes of starting or stopping
/// the event-loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromRepr)]
#[repr(i32)]
pub enum LifecycleStatus {
    /// The operation succeeded.
    Ok = 0,
    /// The runtime thread couldn't be started, or didn't respond.
    ThreadSpawnError = -1,
    /// `shutdown` was called with no event-loop running.
    NotRunning = -2,
}

/// A running event-loop: where to send commands, and the thread to join.
struct RunningLoop {
    sender: Sender<FenrirCommand>,
    thread: JoinHandle<()>,
}

static RUNNING: Mutex<Option<RunningLoop>> = Mutex::new(None);

fn running() -> MutexGuard<'static, Option<RunningLoop>> {
    // A panic while holding the lock can't leave the Option half-written.
    RUNNING.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The command sender of the running event-loop, if there is one.
pub(crate) fn command_sender() -> Option<Sender<FenrirCommand>> {
    running().as_ref().map(|running| running.sender.clone())
}

/// Spawns a new thread and starts an event-loop on it. Other exports
/// start the loop on demand, but calling this first keeps the startup
/// cost out of the first greeting.
///
/// Return values: 0 for success (including when already running),
/// -1 if the runtime could not be started.
#[no_mangle]
pub extern "C" fn setup() -> i32 {
    let mut running = running();
    if running.is_some() {
        debug!("Event loop already set up.");
        return LifecycleStatus::Ok as i32;
    }

    let (ready_tx, ready_rx) = tokio::sync::oneshot::channel();
    let result = std::thread::Builder::new()
        .name(EVENT_LOOP_THREAD_NAME.to_string())
        .spawn(move || {
            match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(WORKER_THREADS)
                .enable_all()
                .build()
            {
                Ok(runtime) => {
                    runtime.block_on(async move { event_loop(ready_tx).await });
                }
                Err(e) => {
                    error!("Error creating runtime: {:?}", e);
                }
            }
        });

    match result {
        Ok(thread) => match ready_rx.blocking_recv() {
            Ok(sender) => {
                *running = Some(RunningLoop { sender, thread });
                debug!("Event loop started.");
                LifecycleStatus::Ok as i32
            }
            Err(_) => {
                error!("Error waiting for event loop to start.");
                let _ = thread.join();
                LifecycleStatus::ThreadSpawnError as i32
            }
        },
        Err(e) => {
            error!("Error spawning thread: {:?}", e);
            LifecycleStatus::ThreadSpawnError as i32
        }
    }
}

/// Shuts down the event-loop and waits for its thread to finish. Commands
/// already queued are answered first. A later call to any export starts
/// a fresh loop; the default greeter keeps its count.
///
/// Return values: 0 for success, -1 if the loop didn't acknowledge the
/// request, -2 if no loop was running.
#[no_mangle]
pub extern "C" fn shutdown() -> i32 {
    let Some(RunningLoop { sender, thread }) = running().take() else {
        warn!("Event loop not set up.");
        return LifecycleStatus::NotRunning as i32;
    };

    let (reply_sender, reply_rx) = tokio::sync::oneshot::channel();
    if sender.blocking_send(FenrirCommand::Quit { reply_sender }).is_err() {
        error!("Event loop is no longer receiving commands.");
        let _ = thread.join();
        return LifecycleStatus::ThreadSpawnError as i32;
    }
    let acknowledged = reply_rx.blocking_recv().is_ok();
    if thread.join().is_err() {
        error!("Event loop thread panicked.");
    }
    if acknowledged {
        LifecycleStatus::Ok as i32
    } else {
        LifecycleStatus::ThreadSpawnError as i32
    }
}

/// Sends the library's diagnostics to stderr, filtered by the `FENRIR_LOG`
/// environment variable (`warn` if unset). The greeting itself always goes
/// to stdout regardless of this setting.
///
/// Return values: 0 for success, -1 if a logger was already installed.
#[no_mangle]
pub extern "C" fn enable_logging() -> i32 {
    let env = env_logger::Env::default().filter_or("FENRIR_LOG", "warn");
    match env_logger::Builder::from_env(env).try_init() {
        Ok(()) => 0,
        Err(_) => -1,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(LifecycleStatus::from_repr(0), Some(LifecycleStatus::Ok));
        assert_eq!(LifecycleStatus::from_repr(-1), Some(LifecycleStatus::ThreadSpawnError));
        assert_eq!(LifecycleStatus::from_repr(-2), Some(LifecycleStatus::NotRunning));
        assert_eq!(LifecycleStatus::from_repr(1), None);
    }

    #[test]
    fn logging_installs_once() {
        // Either this call or another test in the process installed it first.
        let first = enable_logging();
        assert!(first == 0 || first == -1);
        assert_eq!(enable_logging(), -1);
    }
}
