//! Canvas geometry and the text size heuristic used to place text widgets.

use serde::{Deserialize, Serialize};

/// Width of the device canvas in pixels.
pub const CANVAS_WIDTH: f64 = 1380.0;
/// Height of the device canvas in pixels.
pub const CANVAS_HEIGHT: f64 = 1820.0;

/// Rendered glyph height relative to the font size.
pub const CHAR_HEIGHT_RATIO: f64 = 1.3125;
/// Average glyph advance relative to the font size.
pub const CHAR_WIDTH_RATIO: f64 = 1.0 / 1.7;

/// Axis-aligned rectangle in device pixels.
///
/// Bounds are not checked; rectangles reaching outside the canvas are passed to the renderer
/// as given.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering the whole canvas.
    pub fn fullscreen() -> Self {
        Self::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    /// Rectangle at `(x, y)` sized by [`estimate_text_size`].
    pub fn for_text(x: f64, y: f64, font_size: f64, value: &str) -> Self {
        let size = estimate_text_size(font_size, value);
        Self::new(x, y, size.width, size.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Estimates the box the renderer needs to draw `value` at `font_size`.
///
/// Rows are the `\n`-separated pieces (an empty string is one row) and columns are the
/// character count of the longest piece.
pub fn estimate_text_size(font_size: f64, value: &str) -> TextSize {
    let mut rows = 0usize;
    let mut columns = 0usize;
    for line in value.split('\n') {
        rows += 1;
        columns = columns.max(line.chars().count());
    }

    TextSize {
        width: font_size * CHAR_WIDTH_RATIO * columns as f64,
        height: font_size * CHAR_HEIGHT_RATIO * rows as f64,
    }
}
