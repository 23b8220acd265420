//! Widget and directive commands, and their line serialization.
//!
//! Every command becomes exactly one protocol line. Widget lines start with a `type[:id]`
//! header followed by the rectangle and type-specific fields; directive lines start with `@`.
//! Paragraph and textarea lines are wrapped in `[` and `]`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::diacritics::repair_diacritics;
use super::layout::Rect;

/// Global text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justify {
    Left,
    Center,
    Right,
}

impl Justify {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Justify {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload shared by label, paragraph, button, textinput and textarea.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextWidget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RangeWidget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub rect: Rect,
    pub min: f64,
    pub max: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageWidget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub rect: Rect,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasWidget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub rect: Rect,
    pub raw_path: String,
    pub png_path: String,
}

/// One line of a renderer script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SimpleCommand {
    Label(TextWidget),
    Paragraph(TextWidget),
    Button(TextWidget),
    TextInput(TextWidget),
    TextArea(TextWidget),
    Range(RangeWidget),
    Image(ImageWidget),
    Canvas(CanvasWidget),
    Justify {
        justify: Justify,
    },
    FontSize {
        #[serde(rename = "fontSize")]
        font_size: f64,
    },
    Timeout {
        timeout: f64,
    },
    NoClear,
}

impl SimpleCommand {
    pub fn label(rect: Rect, value: impl Into<String>) -> Self {
        Self::Label(TextWidget::new(rect, value))
    }

    pub fn paragraph(rect: Rect, value: impl Into<String>) -> Self {
        Self::Paragraph(TextWidget::new(rect, value))
    }

    pub fn button(rect: Rect, value: impl Into<String>) -> Self {
        Self::Button(TextWidget::new(rect, value))
    }

    pub fn text_input(rect: Rect, value: impl Into<String>) -> Self {
        Self::TextInput(TextWidget::new(rect, value))
    }

    pub fn text_area(rect: Rect, value: impl Into<String>) -> Self {
        Self::TextArea(TextWidget::new(rect, value))
    }

    pub fn range(rect: Rect, min: f64, max: f64, value: f64) -> Self {
        Self::Range(RangeWidget {
            id: None,
            rect,
            min,
            max,
            value,
        })
    }

    pub fn image(rect: Rect, path: impl Into<String>) -> Self {
        Self::Image(ImageWidget {
            id: None,
            rect,
            path: path.into(),
        })
    }

    pub fn canvas(rect: Rect, raw_path: impl Into<String>, png_path: impl Into<String>) -> Self {
        Self::Canvas(CanvasWidget {
            id: None,
            rect,
            raw_path: raw_path.into(),
            png_path: png_path.into(),
        })
    }

    pub fn justify(justify: Justify) -> Self {
        Self::Justify { justify }
    }

    pub fn font_size(font_size: f64) -> Self {
        Self::FontSize { font_size }
    }

    pub fn timeout(timeout: f64) -> Self {
        Self::Timeout { timeout }
    }

    /// Attaches an id to a widget. Directives carry no id and are returned unchanged.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        if let Some(slot) = self.id_slot() {
            *slot = Some(id.into());
        }
        self
    }

    /// Protocol type name, as used in the line header.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Label(_) => "label",
            Self::Paragraph(_) => "paragraph",
            Self::Button(_) => "button",
            Self::TextInput(_) => "textinput",
            Self::TextArea(_) => "textarea",
            Self::Range(_) => "range",
            Self::Image(_) => "image",
            Self::Canvas(_) => "canvas",
            Self::Justify { .. } => "justify",
            Self::FontSize { .. } => "fontsize",
            Self::Timeout { .. } => "timeout",
            Self::NoClear => "noclear",
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Label(widget)
            | Self::Paragraph(widget)
            | Self::Button(widget)
            | Self::TextInput(widget)
            | Self::TextArea(widget) => widget.id.as_deref(),
            Self::Range(widget) => widget.id.as_deref(),
            Self::Image(widget) => widget.id.as_deref(),
            Self::Canvas(widget) => widget.id.as_deref(),
            Self::Justify { .. } | Self::FontSize { .. } | Self::Timeout { .. } | Self::NoClear => {
                None
            }
        }
    }

    pub fn rect(&self) -> Option<Rect> {
        match self {
            Self::Label(widget)
            | Self::Paragraph(widget)
            | Self::Button(widget)
            | Self::TextInput(widget)
            | Self::TextArea(widget) => Some(widget.rect),
            Self::Range(widget) => Some(widget.rect),
            Self::Image(widget) => Some(widget.rect),
            Self::Canvas(widget) => Some(widget.rect),
            Self::Justify { .. } | Self::FontSize { .. } | Self::Timeout { .. } | Self::NoClear => {
                None
            }
        }
    }

    pub fn is_directive(&self) -> bool {
        self.rect().is_none()
    }

    /// Whether the line is wrapped in `[` / `]`.
    pub fn is_block(&self) -> bool {
        matches!(self, Self::Paragraph(_) | Self::TextArea(_))
    }

    /// Renders the command as one protocol line.
    pub fn serialize(&self) -> String {
        match self {
            Self::Justify { justify } => format!("@justify {justify}"),
            Self::FontSize { font_size } => format!("@fontsize {}", format_number(*font_size)),
            Self::Timeout { timeout } => format!("@timeout {}", format_number(*timeout)),
            Self::NoClear => "@noclear".to_string(),
            _ => self.serialize_widget(),
        }
    }

    fn serialize_widget(&self) -> String {
        let mut fields = vec![self.header()];
        if let Some(rect) = self.rect() {
            fields.extend(
                [rect.x, rect.y, rect.width, rect.height]
                    .into_iter()
                    .map(format_number),
            );
        }

        match self {
            Self::Label(widget)
            | Self::Paragraph(widget)
            | Self::Button(widget)
            | Self::TextInput(widget)
            | Self::TextArea(widget) => {
                if !widget.value.is_empty() {
                    fields.push(repair_diacritics(&widget.value));
                }
            }
            Self::Range(widget) => {
                fields.extend(
                    [widget.min, widget.max, widget.value]
                        .into_iter()
                        .map(format_number),
                );
            }
            Self::Image(widget) => fields.push(widget.path.clone()),
            Self::Canvas(widget) => {
                fields.push(widget.raw_path.clone());
                fields.push(widget.png_path.clone());
            }
            Self::Justify { .. } | Self::FontSize { .. } | Self::Timeout { .. } | Self::NoClear => {}
        }

        let line = fields.join(" ");
        if self.is_block() {
            format!("[{line}]")
        } else {
            line
        }
    }

    fn header(&self) -> String {
        match self.id() {
            Some(id) if !id.is_empty() => format!("{}:{id}", self.type_name()),
            _ => self.type_name().to_string(),
        }
    }

    fn id_slot(&mut self) -> Option<&mut Option<String>> {
        match self {
            Self::Label(widget)
            | Self::Paragraph(widget)
            | Self::Button(widget)
            | Self::TextInput(widget)
            | Self::TextArea(widget) => Some(&mut widget.id),
            Self::Range(widget) => Some(&mut widget.id),
            Self::Image(widget) => Some(&mut widget.id),
            Self::Canvas(widget) => Some(&mut widget.id),
            Self::Justify { .. } | Self::FontSize { .. } | Self::Timeout { .. } | Self::NoClear => {
                None
            }
        }
    }
}

impl fmt::Display for SimpleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl TextWidget {
    pub fn new(rect: Rect, value: impl Into<String>) -> Self {
        Self {
            id: None,
            rect,
            value: value.into(),
        }
    }
}

/// Joins the lines of `commands` with `\n`, keeping their order.
pub fn serialize_batch(commands: &[SimpleCommand]) -> String {
    commands
        .iter()
        .map(SimpleCommand::serialize)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ordered batch of commands sent to the renderer as one request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    commands: Vec<SimpleCommand>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: SimpleCommand) -> &mut Self {
        self.commands.push(command);
        self
    }

    pub fn commands(&self) -> &[SimpleCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn serialize(&self) -> String {
        serialize_batch(&self.commands)
    }
}

impl From<Vec<SimpleCommand>> for Script {
    fn from(commands: Vec<SimpleCommand>) -> Self {
        Self { commands }
    }
}

impl FromIterator<SimpleCommand> for Script {
    fn from_iter<I: IntoIterator<Item = SimpleCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

/// Formats a number the way the renderer reads it: integral values without a fraction,
/// `NaN` and `Infinity` spelled out, and exponent notation (`1e+21`, `1e-7`) outside
/// `1e-6..1e21`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Drops the sign of negative zero.
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    value.to_string()
}
