//! Log targets and subscriber setup.
//!
//! The library only emits `tracing` events; binaries decide whether to install a subscriber.
//! Stdout belongs to the protocol, so the subscriber writes to stderr.

use tracing_subscriber::EnvFilter;

/// Target for renderer process lifecycle and response handling.
pub const EXECUTOR_TARGET: &str = "simple_script.executor";

/// Environment variable holding an `EnvFilter` directive, e.g. `simple_script=debug`.
pub const LOG_FILTER_ENV: &str = "SIMPLE_SCRIPT_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr subscriber filtered by [`LOG_FILTER_ENV`].
///
/// Returns `false` when a global subscriber was already set.
pub fn init_stderr() -> bool {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Reports a renderer line that carried no recognizable event.
pub(crate) fn warn_unrecognized_line(line: &str) {
    tracing::warn!(
        target: EXECUTOR_TARGET,
        line = %line,
        "unsupported renderer output"
    );
}
