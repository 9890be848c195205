//! Minimal parser for `panel.toml`
//!
//! Handles only the subset the panel configuration uses:
//! - `[section]` headers (`timing`, `banner`, `uart`, `producers`)
//! - `key = value` with integer or double-quoted string values
//! - `#` comments, including trailing ones (a `#` inside quotes is text)
//!
//! Escape sequences, arrays, tables and multi-line strings are not
//! supported. Unknown sections or keys are errors rather than being
//! skipped, so a typo cannot silently fall back to a default.

use heapless::String;

use super::types::{PanelConfig, LINE_LEN};

/// Parse error, tagged with the 1-based line number where it applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed `[section]` header
    InvalidSection { line: u16 },
    /// Line is neither a header nor `key = value`
    MalformedLine { line: u16 },
    /// Key is not valid in the current section
    UnknownKey { line: u16 },
    /// Value has the wrong type or does not fit the field
    InvalidValue { line: u16 },
    /// Banner text longer than one panel line
    LabelTooLong { line: u16 },
    /// A timing period or the baud rate is zero
    ZeroValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Banner,
    Uart,
    Producers,
}

/// Parse TOML text into a [`PanelConfig`]
///
/// Keys that are absent keep their default values.
pub fn parse_config(input: &str) -> Result<PanelConfig, ParseError> {
    let mut config = PanelConfig::default();
    let mut section = Section::Root;

    for (idx, raw) in input.lines().enumerate() {
        let line = u16::try_from(idx + 1).unwrap_or(u16::MAX);
        let text = strip_comment(raw).trim();

        if text.is_empty() {
            continue;
        }

        if text.starts_with('[') {
            section = parse_section(text).ok_or(ParseError::InvalidSection { line })?;
            continue;
        }

        let (key, value) = text
            .split_once('=')
            .ok_or(ParseError::MalformedLine { line })?;
        let key = key.trim();
        let value = value.trim();

        match (section, key) {
            (Section::Timing, "cycle_ms") => config.timing.cycle_ms = parse_int(value, line)?,
            (Section::Timing, "hold_ms") => config.timing.hold_ms = parse_int(value, line)?,
            (Section::Timing, "dwell_ms") => config.timing.dwell_ms = parse_int(value, line)?,
            (Section::Banner, "line0") => config.banner.line0 = parse_label(value, line)?,
            (Section::Banner, "line1") => config.banner.line1 = parse_label(value, line)?,
            (Section::Uart, "baud") => config.uart_baud = parse_int(value, line)?,
            (Section::Producers, "temp_alert_c") => {
                config.temp_alert_c = parse_int(value, line)?
            }
            _ => return Err(ParseError::UnknownKey { line }),
        }
    }

    let timing = &config.timing;
    if timing.cycle_ms == 0 || timing.hold_ms == 0 || timing.dwell_ms == 0 || config.uart_baud == 0
    {
        return Err(ParseError::ZeroValue);
    }

    Ok(config)
}

/// Cut a trailing `#` comment that is not inside a quoted string
fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_section(text: &str) -> Option<Section> {
    let name = text.strip_prefix('[')?.strip_suffix(']')?.trim();
    match name {
        "timing" => Some(Section::Timing),
        "banner" => Some(Section::Banner),
        "uart" => Some(Section::Uart),
        "producers" => Some(Section::Producers),
        _ => None,
    }
}

fn parse_int<T: core::str::FromStr>(value: &str, line: u16) -> Result<T, ParseError> {
    // TOML allows `_` digit separators (19_200)
    let mut digits: String<24> = String::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue { line })?;
    }
    digits
        .parse()
        .map_err(|_| ParseError::InvalidValue { line })
}

fn parse_label(value: &str, line: u16) -> Result<String<LINE_LEN>, ParseError> {
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue { line })?;
    if inner.contains('"') || inner.contains('\\') {
        return Err(ParseError::InvalidValue { line });
    }

    let mut label = String::new();
    label
        .push_str(inner)
        .map_err(|_| ParseError::LabelTooLong { line })?;
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Panel configuration
[timing]
cycle_ms = 100
hold_ms = 400   # shorter hold
dwell_ms = 500

[banner]
line0 = "  Pit Crew      "
line1 = "  Unit #42      "

[uart]
baud = 19_200

[producers]
temp_alert_c = -5
"#;

    #[test]
    fn test_parse_full_file() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.timing.cycle_ms, 100);
        assert_eq!(config.timing.hold_ms, 400);
        assert_eq!(config.timing.dwell_ms, 500);
        assert_eq!(config.banner.line0.as_str(), "  Pit Crew      ");
        assert_eq!(config.banner.line1.as_str(), "  Unit #42      ");
        assert_eq!(config.uart_baud, 19200);
        assert_eq!(config.temp_alert_c, -5);
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), PanelConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = parse_config("[timing]\ncycle_ms = 50\n").unwrap();
        assert_eq!(config.timing.cycle_ms, 50);
        assert_eq!(config.timing.dwell_ms, 750);
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[motors]\n"),
            Err(ParseError::InvalidSection { line: 1 })
        );
    }

    #[test]
    fn test_unknown_key_reports_line() {
        let input = "[timing]\ncycle_ms = 10\nblink_ms = 3\n";
        assert_eq!(parse_config(input), Err(ParseError::UnknownKey { line: 3 }));
    }

    #[test]
    fn test_key_outside_section() {
        assert_eq!(
            parse_config("cycle_ms = 10\n"),
            Err(ParseError::UnknownKey { line: 1 })
        );
    }

    #[test]
    fn test_malformed_line() {
        assert_eq!(
            parse_config("[uart]\nbaud 9600\n"),
            Err(ParseError::MalformedLine { line: 2 })
        );
    }

    #[test]
    fn test_bad_integer() {
        assert_eq!(
            parse_config("[uart]\nbaud = fast\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_config("[timing]\ncycle_ms = -1\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
    }

    #[test]
    fn test_unquoted_banner() {
        assert_eq!(
            parse_config("[banner]\nline0 = hello\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
    }

    #[test]
    fn test_banner_too_long() {
        assert_eq!(
            parse_config("[banner]\nline1 = \"seventeen chars!!\"\n"),
            Err(ParseError::LabelTooLong { line: 2 })
        );
    }

    #[test]
    fn test_zero_period_rejected() {
        assert_eq!(
            parse_config("[timing]\ndwell_ms = 0\n"),
            Err(ParseError::ZeroValue)
        );
    }

    #[test]
    fn test_hash_inside_quotes_kept() {
        assert_eq!(strip_comment(r#"line1 = "Team #6058" # note"#), r#"line1 = "Team #6058" "#);
    }
}
