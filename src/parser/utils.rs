//! # Parser helpers
//!
//! Timecode parsing, whitespace normalization, entity decoding and attribute
//! lookup.

use quick_xml::{encoding::Decoder, events::BytesStart};
use tracing::warn;

use crate::error::LyricsError;

/// Parses a timecode into seconds.
///
/// Accepts `SS.mmm`, `MM:SS.mmm` and `HH:MM:SS.mmm`, with either `.` or `,`
/// as the decimal separator and an optional trailing `s` unit. Returns `None`
/// for anything else: more than three components, empty or non-numeric
/// components, negative values.
///
/// ```
/// use ttml_lyrics::parse_timecode;
///
/// assert_eq!(parse_timecode("12.5"), Some(12.5));
/// assert!((parse_timecode("1:02,915").unwrap() - 62.915).abs() < 1e-9);
/// assert_eq!(parse_timecode("1:2:3:4"), None);
/// ```
#[must_use]
pub fn parse_timecode(value: &str) -> Option<f64> {
    let value = value.trim();
    let value = value.strip_suffix('s').unwrap_or(value);
    if value.is_empty() {
        return None;
    }

    let mut parts = 0;
    let mut total = 0.0;
    for part in value.split(':') {
        parts += 1;
        if parts > 3 {
            return None;
        }
        total = total * 60.0 + parse_timecode_component(part)?;
    }

    Some(total).filter(|v| v.is_finite())
}

fn parse_timecode_component(part: &str) -> Option<f64> {
    let normalized = part.replace(',', ".");
    if normalized.is_empty() || !normalized.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Collapses every whitespace run to a single space and trims both ends.
///
/// Idempotent: normalizing an already normalized string returns it unchanged.
#[must_use]
pub fn normalize_whitespace(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for word in input.split_whitespace() {
        if !output.is_empty() {
            output.push(' ');
        }
        output.push_str(word);
    }
    output
}

/// Resolves the body of an entity reference (`amp`, `#233`, `#xE9`...).
pub(super) fn decode_entity(name: &str) -> Option<char> {
    if let Some(num_str) = name.strip_prefix('#') {
        let (radix, code_point_str) = num_str
            .strip_prefix('x')
            .map_or((10, num_str), |stripped| (16, stripped));
        return u32::from_str_radix(code_point_str, radix)
            .ok()
            .and_then(char::from_u32);
    }

    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

/// Finds the first attribute whose local name is one of `local_names`.
pub(super) fn get_string_attribute(
    e: &BytesStart,
    decoder: Decoder,
    local_names: &[&[u8]],
) -> Result<Option<String>, LyricsError> {
    let mut attributes = e.attributes();
    attributes.with_checks(false);
    for attr in attributes {
        let attr = attr?;
        if local_names.contains(&attr.key.local_name().as_ref()) {
            let value = attr.decode_and_unescape_value(decoder)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Reads a timecode attribute. Present but unparsable values resolve to `0`.
pub(super) fn get_time_attribute(
    e: &BytesStart,
    decoder: Decoder,
    local_names: &[&[u8]],
) -> Result<Option<f64>, LyricsError> {
    Ok(get_string_attribute(e, decoder, local_names)?.map(|value| {
        parse_timecode(&value).unwrap_or_else(|| {
            warn!("Unparsable timecode '{value}', using 0");
            0.0
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_seconds(input: &str, expected: f64) {
        let parsed = parse_timecode(input).unwrap_or_else(|| panic!("'{input}' did not parse"));
        assert!(
            (parsed - expected).abs() < 1e-4,
            "'{input}' parsed to {parsed}, expected {expected}"
        );
    }

    #[test]
    fn test_parse_timecode() {
        assert_seconds("7", 7.0);
        assert_seconds("0.5", 0.5);
        assert_seconds("15.417", 15.417);
        assert_seconds("15,417", 15.417);
        assert_seconds("123.456", 123.456);
        assert_seconds("1:02.915", 62.915);
        assert_seconds("01:03,100", 63.1);
        assert_seconds("05:10.1", 310.1);
        assert_seconds("01:02:03.456", 3723.456);
        assert_seconds("1:00:00,5", 3600.5);
        assert_seconds("99:59:59.999", 359_999.999);
        assert_seconds("7.123s", 7.123);
        assert_seconds("0", 0.0);

        assert_eq!(parse_timecode(""), None);
        assert_eq!(parse_timecode("s"), None);
        assert_eq!(parse_timecode("abc"), None);
        assert_eq!(parse_timecode("1:2:3:4"), None);
        assert_eq!(parse_timecode("1::2"), None);
        assert_eq!(parse_timecode("-10"), None);
        assert_eq!(parse_timecode("1.2.3"), None);
        assert_eq!(parse_timecode("NaN"), None);
        assert_eq!(parse_timecode("inf"), None);
        assert_eq!(parse_timecode("1e3"), None);
    }

    #[test]
    fn test_parse_timecode_rejects_overflowing_total() {
        let huge_hours = format!("{}:00:00", "9".repeat(306));
        assert_eq!(parse_timecode(&huge_hours), None);
        assert_eq!(parse_timecode(&"9".repeat(400)), None);
    }

    #[test]
    fn test_parse_timecode_round_trip() {
        for hours in [0u32, 1, 2] {
            for minutes in [0u32, 7, 59] {
                for millis in [0u32, 5, 915, 999] {
                    let seconds = 42;
                    let expected = f64::from(hours * 3600 + minutes * 60 + seconds)
                        + f64::from(millis) / 1000.0;
                    assert_seconds(
                        &format!("{hours}:{minutes:02}:{seconds:02}.{millis:03}"),
                        expected,
                    );
                    assert_seconds(
                        &format!("{hours}:{minutes:02}:{seconds:02},{millis:03}"),
                        expected,
                    );
                    if hours == 0 {
                        assert_seconds(&format!("{minutes:02}:{seconds:02}.{millis:03}"), expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  hello   world  "), "hello world");
        assert_eq!(normalize_whitespace("\n\t  foo \r\n bar\t"), "foo bar");
        assert_eq!(normalize_whitespace("single"), "single");
        assert_eq!(normalize_whitespace("   "), "");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_normalize_whitespace_is_idempotent() {
        for input in ["  a  b ", "où je", "\u{3000}wide\u{3000}space", "x"] {
            let once = normalize_whitespace(input);
            assert_eq!(normalize_whitespace(&once), once);
        }
    }

    #[test]
    fn test_decode_entity() {
        assert_eq!(decode_entity("amp"), Some('&'));
        assert_eq!(decode_entity("apos"), Some('\''));
        assert_eq!(decode_entity("#233"), Some('é'));
        assert_eq!(decode_entity("#xE9"), Some('é'));
        assert_eq!(decode_entity("#xZZ"), None);
        assert_eq!(decode_entity("bogus"), None);
    }
}
