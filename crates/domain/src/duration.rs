use crate::errors::ProbeError;
use std::time::Duration;

/// Parse a duration string of the form `<integer><unit>` where the unit is
/// one of `ms`, `s`, `m` or `h`. Used for per-check resolver timeouts.
///
/// Zero durations are rejected: a check timeout must be positive.
pub fn parse_duration(value: &str) -> Result<Duration, ProbeError> {
    let value = value.trim();

    let err = |reason: &str| ProbeError::DurationFormat {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    if value.is_empty() {
        return Err(err("empty duration"));
    }

    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| err("missing unit suffix"))?;
    let (digits, unit) = value.split_at(split);

    if digits.is_empty() {
        return Err(err("missing numeric value"));
    }
    let amount: u64 = digits.parse().map_err(|_| err("value out of range"))?;

    let duration = match unit {
        "ms" => Duration::from_millis(amount),
        "s" => Duration::from_secs(amount),
        "m" => Duration::from_secs(amount * 60),
        "h" => Duration::from_secs(amount * 3600),
        _ => return Err(err("unknown unit, expected ms, s, m or h")),
    };

    if duration.is_zero() {
        return Err(err("duration must be positive"));
    }

    Ok(duration)
}

/// Render a duration the way `parse_duration` accepts it, for report output.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis % 1000 == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", millis)
    }
}
