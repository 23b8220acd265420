//! Client for the `simple` e-ink UI renderer.
//!
//! A script is a batch of one-line commands (widgets and `@` directives) piped to the
//! renderer's stdin; the renderer answers with one event line on stdout once the user
//! interacts with a widget.
//!
//! # Public API Overview
//! - Describe widgets with [`SimpleCommand`] and size text with [`estimate_text_size`].
//! - Serialize with [`SimpleCommand::serialize`] or [`serialize_batch`].
//! - Parse renderer output with [`parse_response_line`].
//! - Run a batch through the renderer with [`ScriptExecutor`], cancelling through
//!   [`PendingResponse`] or a [`CancelHandle`].

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod platform;

/// Canvas geometry and text sizing.
pub use crate::core::layout::{
    estimate_text_size, Rect, TextSize, CANVAS_HEIGHT, CANVAS_WIDTH, CHAR_HEIGHT_RATIO,
    CHAR_WIDTH_RATIO,
};

/// Accent workaround applied to widget text.
pub use crate::core::diacritics::{repair_diacritics, PROBLEM_CHARS};

/// Command model and serializer.
pub use crate::core::command::{
    format_number, serialize_batch, CanvasWidget, ImageWidget, Justify, RangeWidget, Script,
    SimpleCommand, TextWidget,
};

/// Renderer events and the output parser.
pub use crate::core::event::{parse_response_line, SimpleEvent};

/// Renderer process execution.
pub use crate::config::{RendererConfig, DEFAULT_RENDERER_PATH};
pub use crate::error::ScriptError;
pub use crate::platform::process_renderer::{
    parse_response, CancelHandle, PendingResponse, RunResult, ScriptExecutor,
};
#[cfg(unix)]
pub use crate::platform::signals::{cancel_on_termination, SignalCancelGuard};
