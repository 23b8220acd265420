//! Cancels a pending renderer run when the host process is asked to stop.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use signal_hook::iterator::{Handle, Signals};

use super::process_renderer::CancelHandle;
use crate::logging::EXECUTOR_TARGET;

/// Keeps the signal listener alive; dropping it unregisters the handlers.
pub struct SignalCancelGuard {
    handle: Handle,
    fired: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl SignalCancelGuard {
    /// Whether a termination signal has arrived since installation.
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

impl Drop for SignalCancelGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Cancels `cancel` on the first SIGINT or SIGTERM.
pub fn cancel_on_termination(cancel: CancelHandle) -> io::Result<SignalCancelGuard> {
    let mut signals = Signals::new([libc::SIGINT, libc::SIGTERM])?;
    let handle = signals.handle();
    let fired = Arc::new(AtomicBool::new(false));
    let fired_clone = Arc::clone(&fired);

    let thread = thread::Builder::new()
        .name("simple-script-signals".to_string())
        .spawn(move || {
            for signal in signals.forever() {
                if !fired_clone.swap(true, Ordering::SeqCst) {
                    tracing::info!(
                        target: EXECUTOR_TARGET,
                        signal,
                        "termination requested, cancelling renderer run"
                    );
                    cancel.cancel();
                }
            }
        })?;

    Ok(SignalCancelGuard {
        handle,
        fired,
        thread: Some(thread),
    })
}
