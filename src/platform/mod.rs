//! Process integration for the renderer.

pub mod process_renderer;
#[cfg(unix)]
pub mod signals;

pub use process_renderer::{CancelHandle, PendingResponse, RunResult, ScriptExecutor};
#[cfg(unix)]
pub use signals::{cancel_on_termination, SignalCancelGuard};
