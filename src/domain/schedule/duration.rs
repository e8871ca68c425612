//! Shorthand interval parsing (`"15m"`, `"2h"`, `"1d"`, `"30s"`).

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use super::error::ScheduleError;

static SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([0-9]+)([smhd])\s*$").expect("shorthand duration pattern must be valid")
});

/// Parse a `<integer><unit>` shorthand into a duration.
///
/// Units are `s`, `m`, `h` and `d` in any case; surrounding whitespace is ignored.
/// Anything else, including a value whose second count overflows, is
/// [`ScheduleError::InvalidDurationFormat`].
pub fn parse_every(text: &str) -> Result<Duration, ScheduleError> {
    let invalid = || ScheduleError::InvalidDurationFormat(text.to_string());

    let captures = SHORTHAND.captures(text).ok_or_else(invalid)?;
    let value: u64 = captures[1].parse().map_err(|_| invalid())?;
    let factor = captures[2].chars().next().and_then(unit_factor).ok_or_else(invalid)?;
    let seconds = value.checked_mul(factor).ok_or_else(invalid)?;

    Ok(Duration::from_secs(seconds))
}

fn unit_factor(unit: char) -> Option<u64> {
    match unit.to_ascii_lowercase() {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3_600),
        'd' => Some(86_400),
        _ => None,
    }
}
