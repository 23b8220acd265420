//! Events reported by the renderer and the parser for its output lines.

use serde::{Deserialize, Serialize};

const SELECTED_PREFIX: &str = "selected:";
const INPUT_PREFIX: &str = "input:";
const RANGE_PREFIX: &str = "range:";
const FIELD_SEPARATOR: &str = " : ";

/// A user interaction reported for one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SimpleEvent {
    Selection { id: String },
    Input { id: String, value: String },
    /// `value` is NaN when the renderer reported something that is not a number.
    Range { id: String, value: f64 },
}

impl SimpleEvent {
    pub fn id(&self) -> &str {
        match self {
            Self::Selection { id } | Self::Input { id, .. } | Self::Range { id, .. } => id,
        }
    }
}

/// Parses one renderer output line.
///
/// Returns `None` for lines without a recognized prefix; callers decide how loudly to report
/// those.
pub fn parse_response_line(line: &str) -> Option<SimpleEvent> {
    if let Some(rest) = strip_marker(line, SELECTED_PREFIX) {
        return Some(SimpleEvent::Selection {
            id: rest.trim().to_string(),
        });
    }

    if let Some(rest) = strip_marker(line, INPUT_PREFIX) {
        let (id, value) = split_fields(rest);
        return Some(SimpleEvent::Input {
            id: id.to_string(),
            value: value.trim().to_string(),
        });
    }

    if let Some(rest) = strip_marker(line, RANGE_PREFIX) {
        let (id, value) = split_fields(rest);
        return Some(SimpleEvent::Range {
            id: id.to_string(),
            value: parse_number(value.trim()),
        });
    }

    None
}

/// Strips `marker` and the single space the renderer writes after it.
fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(marker)?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Splits `id : value`. Anything after a second separator is dropped; a missing separator
/// yields an empty value.
fn split_fields(rest: &str) -> (&str, &str) {
    let mut parts = rest.split(FIELD_SEPARATOR);
    let id = parts.next().unwrap_or_default();
    let value = parts.next().unwrap_or_default();
    (id, value)
}

/// Lenient numeric conversion: blank is zero, `0x` prefixes are hexadecimal, and anything
/// unparseable becomes NaN instead of an error.
pub fn parse_number(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex, 16)
            .map(|value| value as f64)
            .unwrap_or(f64::NAN);
    }

    // `f64::from_str` also accepts words like "inf" and "nan".
    let numeric_chars = text
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-'));
    if !numeric_chars {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_strips_marker_and_space() {
        assert_eq!(
            parse_response_line("selected: ok"),
            Some(SimpleEvent::Selection {
                id: "ok".to_string()
            })
        );
    }

    #[test]
    fn selected_trims_surrounding_whitespace() {
        assert_eq!(
            parse_response_line("selected:   submit  "),
            Some(SimpleEvent::Selection {
                id: "submit".to_string()
            })
        );
    }

    #[test]
    fn input_splits_id_and_value() {
        assert_eq!(
            parse_response_line("input:name : hello world"),
            Some(SimpleEvent::Input {
                id: "name".to_string(),
                value: "hello world".to_string(),
            })
        );
        assert_eq!(
            parse_response_line("input: name : hello world "),
            Some(SimpleEvent::Input {
                id: "name".to_string(),
                value: "hello world".to_string(),
            })
        );
    }

    #[test]
    fn input_drops_fields_after_second_separator() {
        assert_eq!(
            parse_response_line("input: note : a : b"),
            Some(SimpleEvent::Input {
                id: "note".to_string(),
                value: "a".to_string(),
            })
        );
    }

    #[test]
    fn input_without_separator_has_empty_value() {
        assert_eq!(
            parse_response_line("input: lonely"),
            Some(SimpleEvent::Input {
                id: "lonely".to_string(),
                value: String::new(),
            })
        );
    }

    #[test]
    fn range_parses_numeric_value() {
        assert_eq!(
            parse_response_line("range:slider : 7"),
            Some(SimpleEvent::Range {
                id: "slider".to_string(),
                value: 7.0,
            })
        );
    }

    #[test]
    fn range_with_garbage_value_is_nan() {
        let Some(SimpleEvent::Range { id, value }) = parse_response_line("range:slider : abc")
        else {
            panic!("expected range event");
        };
        assert_eq!(id, "slider");
        assert!(value.is_nan());
    }

    #[test]
    fn unknown_lines_yield_nothing() {
        assert_eq!(parse_response_line("garbage"), None);
        assert_eq!(parse_response_line(""), None);
        assert_eq!(parse_response_line(" selected: ok"), None);
    }

    #[test]
    fn parse_number_is_lenient() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("-3.5"), -3.5);
        assert_eq!(parse_number("1e3"), 1000.0);
        assert_eq!(parse_number("0x1f"), 31.0);
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("nan").is_nan());
        assert!(parse_number("12px").is_nan());
    }

    #[test]
    fn event_id_accessor_covers_all_variants() {
        let event = SimpleEvent::Range {
            id: "r".to_string(),
            value: 1.0,
        };
        assert_eq!(event.id(), "r");
    }
}
