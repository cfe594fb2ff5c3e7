//! Minimal TOML parser for the console configuration
//!
//! Handles only the subset used by `stepdeck.toml`:
//! - `[section]` headers
//! - `key = value` pairs (integer, one-decimal number, boolean)
//! - Comments (`# ...`), including trailing ones
//!
//! Keys the parser does not know are skipped so older firmware accepts newer
//! files. Unknown sections are an error.

use stepdeck_protocol::DisplayValue;

use super::types::ConsoleConfig;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Value does not match the key's type
    InvalidValue,
    /// Key outside any section
    KeyOutsideSection,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Defaults,
    Latch,
    Timing,
    Motion,
}

/// Parse configuration text, starting from the built-in defaults
pub fn parse_config(input: &str) -> Result<ConsoleConfig, ParseError> {
    let mut config = ConsoleConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "defaults" => Ok(Section::Defaults),
        "latch" => Ok(Section::Latch),
        "timing" => Ok(Section::Timing),
        "motion" => Ok(Section::Motion),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // No strings in this format, so any '#' starts a comment
    let value = match value.find('#') {
        Some(hash_pos) => value[..hash_pos].trim(),
        None => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a display value
///
/// `42` is an integer value, `4.2` a fractional one (stored as 42 tenths).
/// Exactly one decimal digit is accepted.
fn parse_display_value(value: &str) -> Result<DisplayValue, ParseError> {
    match value.split_once('.') {
        None => Ok(DisplayValue::Integer(parse_int(value)?)),
        Some((whole, tenth)) => {
            if whole.is_empty() || tenth.len() != 1 {
                return Err(ParseError::InvalidValue);
            }
            let whole: u16 = parse_int(whole)?;
            let tenth: u16 = parse_int(tenth)?;
            whole
                .checked_mul(10)
                .and_then(|t| t.checked_add(tenth))
                .map(DisplayValue::Fractional)
                .ok_or(ParseError::InvalidValue)
        }
    }
}

/// Index of a numbered key like "display3" (1-based in the file)
fn numbered(key: &str, prefix: &str, count: usize) -> Option<usize> {
    let n: usize = key.strip_prefix(prefix)?.parse().ok()?;
    (1..=count).contains(&n).then(|| n - 1)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ConsoleConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => return Err(ParseError::KeyOutsideSection),
        Section::Display => {
            if key == "brightness" {
                config.displays.brightness = parse_int(value)?;
            } else if let Some(i) = numbered(key, "display", 4) {
                config.displays.initial[i] = parse_display_value(value)?;
            }
        }
        Section::Defaults => {
            if let Some(i) = numbered(key, "display", 3) {
                config.displays.defaults[i] = parse_display_value(value)?;
            }
        }
        Section::Latch => {
            if let Some(i) = numbered(key, "countdown", 3) {
                config.latches.countdown[i] = parse_bool(value)?;
            }
        }
        Section::Timing => {
            let timing = &mut config.timing;
            match key {
                "render_ms" => timing.render_ms = parse_int(value)?,
                "second_ms" => timing.second_ms = parse_int(value)?,
                "countdown_divisor" => timing.countdown_divisor = parse_int(value)?,
                "lamp_test_ms" => timing.lamp_test_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Motion => {
            let motion = &mut config.motion;
            match key {
                "full_steps" => motion.full_steps = parse_int(value)?,
                "microsteps" => motion.microsteps = parse_int(value)?,
                "advance_percent" => motion.advance_percent = parse_int(value)?,
                "retreat_percent" => motion.retreat_percent = parse_int(value)?,
                "dwell_ms" => motion.dwell_ms = parse_int(value)?,
                "rest_ms" => motion.rest_ms = parse_int(value)?,
                "low_rate_us" => motion.low_rate_us = parse_int(value)?,
                "high_rate_us" => motion.high_rate_us = parse_int(value)?,
                "pulse_us" => motion.pulse_us = parse_int(value)?,
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config(""), Ok(ConsoleConfig::default()));
        assert_eq!(parse_config("# only a comment\n\n"), Ok(ConsoleConfig::default()));
    }

    #[test]
    fn test_parse_display_value() {
        assert_eq!(parse_display_value("300"), Ok(DisplayValue::Integer(300)));
        assert_eq!(parse_display_value("4.2"), Ok(DisplayValue::Fractional(42)));
        assert_eq!(parse_display_value("12.0"), Ok(DisplayValue::Fractional(120)));
        assert_eq!(parse_display_value("1.25"), Err(ParseError::InvalidValue));
        assert_eq!(parse_display_value(".5"), Err(ParseError::InvalidValue));
        assert_eq!(parse_display_value("-1"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_numbered_keys() {
        assert_eq!(numbered("display1", "display", 4), Some(0));
        assert_eq!(numbered("display4", "display", 4), Some(3));
        assert_eq!(numbered("display4", "display", 3), None);
        assert_eq!(numbered("display0", "display", 4), None);
        assert_eq!(numbered("displayx", "display", 4), None);
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# Console setup
[display]
display1 = 10
display2 = 2.5   # seconds
brightness = 40000

[defaults]
display1 = 200
display3 = 7.5

[latch]
countdown2 = false

[timing]
render_ms = 20
countdown_divisor = 5

[motion]
microsteps = 16
dwell_ms = 0
future_key = 12
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.displays.initial[0], DisplayValue::Integer(10));
        assert_eq!(config.displays.initial[1], DisplayValue::Fractional(25));
        assert_eq!(config.displays.initial[2], DisplayValue::Integer(3));
        assert_eq!(config.displays.brightness, 40000);
        assert_eq!(config.displays.defaults[0], DisplayValue::Integer(200));
        assert_eq!(config.displays.defaults[1], DisplayValue::Integer(120));
        assert_eq!(config.displays.defaults[2], DisplayValue::Fractional(75));
        assert_eq!(config.latches.countdown, [true, false, true]);
        assert_eq!(config.timing.render_ms, 20);
        assert_eq!(config.timing.second_ms, 100);
        assert_eq!(config.timing.countdown_divisor, 5);
        assert_eq!(config.motion.microsteps, 16);
        assert_eq!(config.motion.dwell_ms, 0);
        assert_eq!(config.motion.full_steps, 200);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_config("[network]\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("render_ms = 5\n"), Err(ParseError::KeyOutsideSection));
        assert_eq!(
            parse_config("[latch]\ncountdown1 = yes\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[timing]\nrender_ms = -5\n"),
            Err(ParseError::InvalidValue)
        );
    }
}
