use std::time::Duration;

use crate::error::{Result, TickerError};

/// Suffix to milliseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[("ms", 1.0), ("s", 1_000.0), ("m", 60_000.0)];

/// Parse dwell strings like "4s", "1000ms", "1.5s" or "2m".
///
/// A bare number is read as milliseconds.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            return to_duration(val_str, *multiplier, s);
        }
    }

    to_duration(s, 1.0, s)
}

fn to_duration(val_str: &str, multiplier: f64, original: &str) -> Result<Duration> {
    let val: f64 = val_str
        .trim()
        .parse()
        .map_err(|_| TickerError::InvalidDuration(original.to_string()))?;
    if !val.is_finite() || val < 0.0 {
        return Err(TickerError::InvalidDuration(original.to_string()));
    }
    Ok(Duration::from_micros((val * multiplier * 1_000.0) as u64))
}

/// Format a dwell for display
pub fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis < 1_000 || millis % 1_000 != 0 {
        format!("{}ms", millis)
    } else {
        format!("{}s", millis / 1_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_duration("4s").unwrap(), Duration::from_millis(4000));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_milliseconds() {
        assert_eq!(parse_duration("1000ms").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration(" 250 ").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_duration("soon"),
            Err(TickerError::InvalidDuration(_))
        ));
        assert!(parse_duration("-1s").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(4000)), "4s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1500ms");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }
}
