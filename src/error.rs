use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to start renderer {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write script to renderer stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("failed to read renderer output: {0}")]
    Stream(#[source] std::io::Error),

    #[error("failed waiting for renderer {path}: {source}")]
    Wait {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("renderer run was cancelled")]
    Cancelled,

    #[error("renderer did not respond within {timeout_ms}ms")]
    TimedOut { timeout_ms: u128 },

    #[error("failed to start renderer worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("renderer worker panicked")]
    WorkerPanicked,
}

impl ScriptError {
    #[must_use]
    pub fn spawn(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Spawn {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn wait(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Wait {
            path: path.into(),
            source,
        }
    }

    /// Whether the run ended because the caller gave up on it.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::TimedOut { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_error_names_the_renderer_path() {
        let error = ScriptError::spawn(
            "/opt/bin/simple",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(
            error.to_string(),
            "failed to start renderer /opt/bin/simple: missing"
        );
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn cancellation_kinds() {
        assert!(ScriptError::Cancelled.is_cancellation());
        assert!(ScriptError::TimedOut { timeout_ms: 5 }.is_cancellation());
        assert!(!ScriptError::WorkerPanicked.is_cancellation());
    }
}
