//! `MM:SS` timestamp parsing and formatting.
//!
//! Generated scripts mark section boundaries with `[MM:SS]` timestamps.
//! This module provides the shared conversion between that form and total
//! seconds.

/// Parse a `MM:SS` timestamp into total seconds.
///
/// # Examples
/// ```
/// use vgen_models::timestamp::parse_timestamp;
/// assert_eq!(parse_timestamp("00:30").unwrap(), 30);
/// assert_eq!(parse_timestamp("02:15").unwrap(), 135);
/// ```
pub fn parse_timestamp(ts: &str) -> Result<u32, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    let (minutes, seconds) = ts
        .split_once(':')
        .ok_or_else(|| TimestampError::InvalidFormat(ts.to_string()))?;

    let minutes: u32 = minutes
        .parse()
        .map_err(|_| TimestampError::InvalidValue("minutes", minutes.to_string()))?;
    let seconds: u32 = seconds
        .parse()
        .map_err(|_| TimestampError::InvalidValue("seconds", seconds.to_string()))?;

    if seconds >= 60 {
        return Err(TimestampError::InvalidValue("seconds", seconds.to_string()));
    }

    Ok(minutes * 60 + seconds)
}

/// Format total seconds as a `MM:SS` timestamp.
///
/// # Examples
/// ```
/// use vgen_models::timestamp::format_timestamp;
/// assert_eq!(format_timestamp(90), "01:30");
/// ```
pub fn format_timestamp(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("Timestamp cannot be empty")]
    Empty,

    #[error("Invalid {0} value: {1}")]
    InvalidValue(&'static str, String),

    #[error("Invalid timestamp format '{0}'. Use MM:SS")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("00:00").unwrap(), 0);
        assert_eq!(parse_timestamp("00:30").unwrap(), 30);
        assert_eq!(parse_timestamp("01:00").unwrap(), 60);
        assert_eq!(parse_timestamp("02:15").unwrap(), 135);
        assert_eq!(parse_timestamp("10:00").unwrap(), 600);
    }

    #[test]
    fn test_parse_timestamp_trims_whitespace() {
        assert_eq!(parse_timestamp(" 01:30 ").unwrap(), 90);
    }

    #[test]
    fn test_parse_timestamp_errors() {
        assert!(matches!(parse_timestamp(""), Err(TimestampError::Empty)));
        assert!(matches!(
            parse_timestamp("90"),
            Err(TimestampError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_timestamp("ab:cd"),
            Err(TimestampError::InvalidValue("minutes", _))
        ));
        assert!(matches!(
            parse_timestamp("01:75"),
            Err(TimestampError::InvalidValue("seconds", _))
        ));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "00:00");
        assert_eq!(format_timestamp(30), "00:30");
        assert_eq!(format_timestamp(90), "01:30");
        assert_eq!(format_timestamp(600), "10:00");
    }

    #[test]
    fn test_round_trip() {
        for secs in [0, 1, 59, 60, 61, 599, 3599] {
            assert_eq!(parse_timestamp(&format_timestamp(secs)).unwrap(), secs);
        }
    }
}
