//! Runs a script through the renderer process and collects its response.
//!
//! Each run owns one renderer process. A worker thread writes the script to the renderer's
//! stdin, closes it, and waits for the process to exit while polling for cancellation; the
//! response is parsed from the last non-empty output line.

use std::io::{self, Read, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use wait_timeout::ChildExt;

use crate::config::RendererConfig;
use crate::core::command::{serialize_batch, SimpleCommand};
use crate::core::event::{parse_response_line, SimpleEvent};
use crate::error::ScriptError;
use crate::logging::{warn_unrecognized_line, EXECUTOR_TARGET};

pub type RunResult = Result<Option<SimpleEvent>, ScriptError>;

/// Shared flag used to abandon a pending run.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; the renderer is killed on the worker's next poll.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A renderer run that has been started but not yet collected.
#[derive(Debug)]
pub struct PendingResponse {
    cancel: CancelHandle,
    result_rx: Receiver<RunResult>,
}

impl PendingResponse {
    /// Abandons the run. This also applies while output is still being collected after the
    /// renderer exits.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Blocks until the renderer exits, fails, or the run is cancelled.
    pub fn wait(self) -> RunResult {
        match self.result_rx.recv() {
            Ok(result) => result,
            Err(_) => Err(ScriptError::WorkerPanicked),
        }
    }

    /// Like [`PendingResponse::wait`], but cancels the run once `timeout` elapses.
    pub fn wait_timeout(self, timeout: Duration) -> RunResult {
        match self.result_rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                self.cancel.cancel();
                Err(ScriptError::TimedOut {
                    timeout_ms: timeout.as_millis(),
                })
            }
            Err(RecvTimeoutError::Disconnected) => Err(ScriptError::WorkerPanicked),
        }
    }

    /// Returns the result if the run has already settled.
    pub fn try_wait(&self) -> Option<RunResult> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ScriptError::WorkerPanicked)),
        }
    }
}

/// Starts renderer runs with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct ScriptExecutor {
    config: RendererConfig,
}

impl ScriptExecutor {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(RendererConfig::from_env())
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Serializes `commands` and sends them to a fresh renderer process.
    ///
    /// Spawn and I/O failures are reported by the returned [`PendingResponse`], not here.
    pub fn run(&self, commands: &[SimpleCommand]) -> Result<PendingResponse, ScriptError> {
        self.run_script(serialize_batch(commands))
    }

    /// Sends an already serialized script.
    pub fn run_script(&self, script: String) -> Result<PendingResponse, ScriptError> {
        let cancel = CancelHandle::new();
        let (result_tx, result_rx) = mpsc::channel();
        let config = self.config.clone();
        let worker_cancel = cancel.clone();

        thread::Builder::new()
            .name("simple-script-run".to_string())
            .spawn(move || {
                let outcome = catch_unwind(AssertUnwindSafe(|| {
                    run_renderer(&config, script, &worker_cancel)
                }));
                let result = outcome.unwrap_or(Err(ScriptError::WorkerPanicked));
                let _ = result_tx.send(result);
            })
            .map_err(ScriptError::WorkerSpawn)?;

        Ok(PendingResponse { cancel, result_rx })
    }
}

fn run_renderer(config: &RendererConfig, script: String, cancel: &CancelHandle) -> RunResult {
    if cancel.is_cancelled() {
        return Err(ScriptError::Cancelled);
    }

    let mut child = Command::new(&config.bin_path)
        .args(&config.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| ScriptError::spawn(&config.bin_path, source))?;

    tracing::debug!(
        target: EXECUTOR_TARGET,
        path = %config.bin_path.display(),
        pid = child.id(),
        script_bytes = script.len(),
        "renderer started"
    );

    let writer = child.stdin.take().map(|stdin| spawn_stdin_writer(stdin, script));
    let reader = child.stdout.take().map(spawn_stdout_reader);

    // On cancellation the helper threads are left to finish once the pipes close.
    let status = wait_for_exit(&mut child, config, cancel)?;

    // A process started by the renderer can keep the pipes open after it exits, so
    // cancellation stays live until both helpers report back.
    if let Some(writer) = writer {
        wait_for_helper(&writer, config, cancel)?.map_err(ScriptError::Stdin)?;
    }

    let output = match reader {
        Some(reader) => wait_for_helper(&reader, config, cancel)?.map_err(ScriptError::Stream)?,
        None => Vec::new(),
    };

    if !status.success() {
        tracing::warn!(
            target: EXECUTOR_TARGET,
            status = %format_exit_status(status),
            "renderer exited unsuccessfully"
        );
    } else {
        tracing::debug!(
            target: EXECUTOR_TARGET,
            output_bytes = output.len(),
            "renderer finished"
        );
    }

    Ok(parse_response(&String::from_utf8_lossy(&output)))
}

fn wait_for_exit(
    child: &mut Child,
    config: &RendererConfig,
    cancel: &CancelHandle,
) -> Result<ExitStatus, ScriptError> {
    loop {
        if cancel.is_cancelled() {
            let _ = child.kill();
            let _ = child.wait();
            tracing::info!(
                target: EXECUTOR_TARGET,
                pid = child.id(),
                "renderer killed after cancellation"
            );
            return Err(ScriptError::Cancelled);
        }

        match child.wait_timeout(config.poll_interval) {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => continue,
            Err(error) => {
                let _ = child.kill();
                return Err(ScriptError::wait(&config.bin_path, error));
            }
        }
    }
}

fn wait_for_helper<T>(
    helper: &Receiver<io::Result<T>>,
    config: &RendererConfig,
    cancel: &CancelHandle,
) -> Result<io::Result<T>, ScriptError> {
    loop {
        if cancel.is_cancelled() {
            tracing::info!(
                target: EXECUTOR_TARGET,
                "renderer pipes abandoned after cancellation"
            );
            return Err(ScriptError::Cancelled);
        }

        match helper.recv_timeout(config.poll_interval) {
            Ok(result) => return Ok(result),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return Err(ScriptError::WorkerPanicked),
        }
    }
}

fn spawn_stdin_writer(mut stdin: ChildStdin, script: String) -> Receiver<io::Result<()>> {
    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let written = stdin
            .write_all(script.as_bytes())
            .and_then(|()| stdin.flush());
        drop(stdin);
        let result = match written {
            // The renderer may exit without reading everything it was sent.
            Err(error) if error.kind() == io::ErrorKind::BrokenPipe => {
                tracing::debug!(
                    target: EXECUTOR_TARGET,
                    "renderer closed stdin before the script was fully written"
                );
                Ok(())
            }
            other => other,
        };
        let _ = done_tx.send(result);
    });
    done_rx
}

fn spawn_stdout_reader(mut stdout: impl Read + Send + 'static) -> Receiver<io::Result<Vec<u8>>> {
    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let mut bytes = Vec::new();
        let result = stdout.read_to_end(&mut bytes).map(|_| bytes);
        let _ = done_tx.send(result);
    });
    done_rx
}

/// Picks the response line out of the renderer's output and parses it.
///
/// Only the last non-empty line is significant; earlier lines are diagnostics.
pub fn parse_response(output: &str) -> Option<SimpleEvent> {
    let Some(line) = output
        .lines()
        .rev()
        .map(|line| line.trim_end_matches('\r'))
        .find(|line| !line.trim().is_empty())
    else {
        tracing::debug!(target: EXECUTOR_TARGET, "renderer produced no output");
        return None;
    };

    let event = parse_response_line(line);
    if event.is_none() {
        warn_unrecognized_line(line);
    }
    event
}

fn format_exit_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit_code={code}"),
        None => "exit_code=terminated_by_signal".to_string(),
    }
}
