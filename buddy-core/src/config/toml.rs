//! Simple TOML parser for figure configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `figure.toml`. It does NOT support full TOML.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - [section.subsection] headers
//! - String arrays, on one line or spread over several lines
//! - Comments (# ...)
//!
//! Unknown keys are ignored so older images accept newer files.

use super::{ConfigError, FigureConfig, ServoConfig, SoundCatalog};

/// Which servo a `[servo.*]` section configures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServoSection {
    Wave,
    Lid,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Catalog,
    Wave,
    Lid,
    Servo(ServoSection),
    Touch,
}

/// Parse TOML configuration into a validated FigureConfig
///
/// Sections and keys that are absent keep their default values. A
/// `clips` array replaces the default catalog entirely.
pub fn parse_config(input: &str) -> Result<FigureConfig, ConfigError> {
    let mut config = FigureConfig::default();
    let mut section = Section::Root;
    let mut in_clips = false;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if in_clips {
            in_clips = !push_array_items(line, &mut config.catalog)?;
            continue;
        }

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let Some((key, value)) = parse_key_value(line) else {
            continue;
        };

        if section == Section::Catalog && key == "clips" {
            let rest = value
                .strip_prefix('[')
                .ok_or(ConfigError::InvalidValue)?;
            config.catalog.clear();
            in_clips = !push_array_items(rest, &mut config.catalog)?;
            continue;
        }

        apply_value(section, key, value, &mut config)?;
    }

    if in_clips {
        return Err(ConfigError::UnterminatedArray);
    }

    config.validate()?;
    Ok(config)
}

/// Parse section header like "wave", "servo.lid" or "servo lid"
fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    let header = header.trim();
    let mut parts = header.split(|c: char| c == '.' || c.is_whitespace());
    let section_type = parts.next().ok_or(ConfigError::InvalidSection)?;
    let name = parts.next();

    if parts.next().is_some() {
        return Err(ConfigError::InvalidSection);
    }

    match (section_type, name) {
        ("catalog", None) => Ok(Section::Catalog),
        ("wave", None) => Ok(Section::Wave),
        ("lid", None) => Ok(Section::Lid),
        ("touch", None) => Ok(Section::Touch),
        ("servo", Some("wave")) => Ok(Section::Servo(ServoSection::Wave)),
        ("servo", Some("lid")) => Ok(Section::Servo(ServoSection::Lid)),
        _ => Err(ConfigError::InvalidSection),
    }
}

/// Apply a scalar key to the current section
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut FigureConfig,
) -> Result<(), ConfigError> {
    match section {
        Section::Root => {
            if key == "poll_interval_ms" {
                config.poll_interval_ms = parse_int(value)?;
            }
        }
        Section::Catalog => {}
        Section::Wave => match key {
            "start_angle" => config.wave.start_angle = parse_int(value)?,
            "mid_angle" => config.wave.mid_angle = parse_int(value)?,
            "end_angle" => config.wave.end_angle = parse_int(value)?,
            "step" => config.wave.step = parse_int(value)?,
            "step_delay_ms" => config.wave.step_delay_ms = parse_int(value)?,
            _ => {}
        },
        Section::Lid => match key {
            "open_angle" => config.lid.open_angle = parse_int(value)?,
            "rest_angle" => config.lid.rest_angle = parse_int(value)?,
            "slow_after" => config.lid.slow_after = parse_int(value)?,
            "step_delay_ms" => config.lid.step_delay_ms = parse_int(value)?,
            _ => {}
        },
        Section::Servo(which) => {
            let servo: &mut ServoConfig = match which {
                ServoSection::Wave => &mut config.wave_servo,
                ServoSection::Lid => &mut config.lid_servo,
            };
            match key {
                "min_pulse_us" => servo.min_pulse_us = parse_int(value)?,
                "max_pulse_us" => servo.max_pulse_us = parse_int(value)?,
                "actuation_range" => servo.actuation_range = parse_int(value)?,
                _ => {}
            }
        }
        Section::Touch => match key {
            "threshold_step" => config.touch.threshold_step = parse_int(value)?,
            "threshold_passes" => config.touch.threshold_passes = parse_int(value)?,
            _ => {}
        },
    }
    Ok(())
}

/// Push the quoted items of one array line into the catalog
///
/// Returns true once the closing `]` has been seen.
fn push_array_items(text: &str, catalog: &mut SoundCatalog) -> Result<bool, ConfigError> {
    let (items, closed) = match text.find(']') {
        Some(end) => {
            if !text[end + 1..].trim().is_empty() {
                return Err(ConfigError::InvalidValue);
            }
            (&text[..end], true)
        }
        None => (text, false),
    };

    for item in items.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        catalog.push(parse_string(item)?)?;
    }

    Ok(closed)
}

/// Remove a trailing comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ConfigError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ConfigError::InvalidValue)
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}
