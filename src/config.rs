//! Renderer process configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Where the `simple` renderer is installed on the device.
pub const DEFAULT_RENDERER_PATH: &str = "/opt/bin/simple";

const DEFAULT_POLL_INTERVAL_MS: u64 = 20;

pub const RENDERER_PATH_ENV: &str = "SIMPLE_SCRIPT_BIN";
pub const POLL_INTERVAL_ENV: &str = "SIMPLE_SCRIPT_POLL_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Renderer executable.
    pub bin_path: PathBuf,
    /// Arguments passed before the script is piped in. The device renderer takes none.
    pub args: Vec<String>,
    /// How often a pending run checks for cancellation while the renderer is alive.
    pub poll_interval: Duration,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            bin_path: PathBuf::from(DEFAULT_RENDERER_PATH),
            args: Vec::new(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl RendererConfig {
    pub fn new(bin_path: impl Into<PathBuf>) -> Self {
        Self {
            bin_path: bin_path.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = env_string_opt(RENDERER_PATH_ENV) {
            config.bin_path = PathBuf::from(path);
        }
        if let Some(poll_ms) = env_u64_opt(POLL_INTERVAL_ENV) {
            config.poll_interval = Duration::from_millis(poll_ms.max(1));
        }
        config
    }

    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

fn env_u64_opt(key: &str) -> Option<u64> {
    env_string_opt(key).and_then(|value| value.trim().parse().ok())
}
