use std::time::Duration;

use serde::{Deserialize, Serialize, Serializer};

use super::duration::parse_every;
use super::error::ScheduleError;
use crate::domain::configuration::{DEFAULT_TIMEZONE, non_blank};

/// Schedule sub-document of a flow entry, as written by the author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSchedule {
    /// `cron` or `interval`, any case; `cron` when absent.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub cron: Option<String>,
    pub every: Option<String>,
    pub timezone: Option<String>,
}

impl RawSchedule {
    /// True when no key was given at all (`schedule: {}`).
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.cron.is_none()
            && self.every.is_none()
            && self.timezone.is_none()
    }
}

/// Normalized schedule handed to the registration API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScheduleSpec {
    Cron {
        expression: String,
        timezone: String,
    },
    Interval {
        #[serde(rename = "every_seconds", serialize_with = "serialize_seconds")]
        period: Duration,
        timezone: String,
    },
}

impl ScheduleSpec {
    pub fn timezone(&self) -> &str {
        match self {
            ScheduleSpec::Cron { timezone, .. } | ScheduleSpec::Interval { timezone, .. } => {
                timezone
            }
        }
    }

    /// Short human-readable form used in reports, e.g. `cron "0 6 * * *" (UTC)`.
    pub fn describe(&self) -> String {
        match self {
            ScheduleSpec::Cron { expression, timezone } => {
                format!("cron \"{}\" ({})", expression, timezone)
            }
            ScheduleSpec::Interval { period, timezone } => {
                format!("every {}s ({})", period.as_secs(), timezone)
            }
        }
    }
}

fn serialize_seconds<S: Serializer>(period: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(period.as_secs())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScheduleKind {
    Cron,
    Interval,
}

impl ScheduleKind {
    fn parse(raw: Option<&str>) -> Result<Self, ScheduleError> {
        let Some(value) = non_blank(raw) else {
            return Ok(ScheduleKind::Cron);
        };

        match value.to_ascii_lowercase().as_str() {
            "cron" => Ok(ScheduleKind::Cron),
            "interval" => Ok(ScheduleKind::Interval),
            _ => Err(ScheduleError::UnsupportedScheduleType(value.to_string())),
        }
    }
}

/// Build the normalized schedule for one flow entry.
///
/// An absent or empty sub-document means the deployment is unscheduled and yields
/// `Ok(None)`. The entry's own `timezone` wins over `fallback_timezone`; when both are
/// blank the result is `UTC`.
pub fn build_schedule(
    raw: Option<&RawSchedule>,
    fallback_timezone: &str,
) -> Result<Option<ScheduleSpec>, ScheduleError> {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let kind = ScheduleKind::parse(raw.kind.as_deref())?;
    let timezone = non_blank(raw.timezone.as_deref())
        .or_else(|| non_blank(Some(fallback_timezone)))
        .unwrap_or(DEFAULT_TIMEZONE)
        .to_string();

    let spec = match kind {
        ScheduleKind::Cron => {
            let expression =
                non_blank(raw.cron.as_deref()).ok_or(ScheduleError::MissingCronExpression)?;
            ScheduleSpec::Cron { expression: expression.to_string(), timezone }
        }
        ScheduleKind::Interval => {
            let every =
                non_blank(raw.every.as_deref()).ok_or(ScheduleError::MissingIntervalDuration)?;
            ScheduleSpec::Interval { period: parse_every(every)?, timezone }
        }
    };

    Ok(Some(spec))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cron(expression: &str) -> RawSchedule {
        RawSchedule { cron: Some(expression.to_string()), ..Default::default() }
    }

    fn interval(every: &str) -> RawSchedule {
        RawSchedule {
            kind: Some("interval".to_string()),
            every: Some(every.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn absent_or_empty_schedule_means_unscheduled() {
        assert_eq!(build_schedule(None, "UTC").unwrap(), None);
        assert_eq!(build_schedule(Some(&RawSchedule::default()), "UTC").unwrap(), None);
    }

    #[test]
    fn missing_type_behaves_like_explicit_cron() {
        let implicit = build_schedule(Some(&cron("0 6 * * *")), "UTC").unwrap();
        let explicit = RawSchedule { kind: Some("cron".to_string()), ..cron("0 6 * * *") };
        assert_eq!(implicit, build_schedule(Some(&explicit), "UTC").unwrap());
        assert_eq!(
            implicit,
            Some(ScheduleSpec::Cron { expression: "0 6 * * *".into(), timezone: "UTC".into() })
        );
    }

    #[test]
    fn type_is_case_insensitive() {
        let raw = RawSchedule { kind: Some("  INTERVAL ".to_string()), ..interval("15m") };
        let spec = build_schedule(Some(&raw), "UTC").unwrap().unwrap();
        assert_eq!(
            spec,
            ScheduleSpec::Interval { period: Duration::from_secs(900), timezone: "UTC".into() }
        );

        let raw = RawSchedule { kind: Some("Cron".to_string()), ..cron("*/5 * * * *") };
        assert!(matches!(build_schedule(Some(&raw), "UTC"), Ok(Some(ScheduleSpec::Cron { .. }))));
    }

    #[test]
    fn cron_requires_expression() {
        let raw = RawSchedule { kind: Some("cron".to_string()), ..Default::default() };
        assert_eq!(build_schedule(Some(&raw), "UTC"), Err(ScheduleError::MissingCronExpression));
        assert_eq!(
            build_schedule(Some(&cron("   ")), "UTC"),
            Err(ScheduleError::MissingCronExpression)
        );
    }

    #[test]
    fn interval_requires_every() {
        let raw = RawSchedule { kind: Some("interval".to_string()), ..Default::default() };
        assert_eq!(build_schedule(Some(&raw), "UTC"), Err(ScheduleError::MissingIntervalDuration));
        assert_eq!(
            build_schedule(Some(&interval("")), "UTC"),
            Err(ScheduleError::MissingIntervalDuration)
        );
    }

    #[test]
    fn interval_rejects_malformed_shorthand() {
        let err = build_schedule(Some(&interval("15 minutes")), "UTC").unwrap_err();
        assert_eq!(err, ScheduleError::InvalidDurationFormat("15 minutes".into()));
    }

    #[test]
    fn unsupported_type_carries_offending_value() {
        let raw = RawSchedule { kind: Some("bogus".to_string()), ..cron("0 6 * * *") };
        let err = build_schedule(Some(&raw), "UTC").unwrap_err();
        assert_eq!(err, ScheduleError::UnsupportedScheduleType("bogus".into()));
        assert!(err.to_string().contains("'bogus'"));
    }

    #[test]
    fn entry_timezone_wins_over_fallback() {
        let raw =
            RawSchedule { timezone: Some("America/New_York".to_string()), ..cron("0 6 * * *") };
        let spec = build_schedule(Some(&raw), "UTC").unwrap().unwrap();
        assert_eq!(spec.timezone(), "America/New_York");
    }

    #[test]
    fn fallback_timezone_applies_when_entry_has_none() {
        let spec = build_schedule(Some(&interval("1d")), "Europe/Berlin").unwrap().unwrap();
        assert_eq!(spec.timezone(), "Europe/Berlin");
    }

    #[test]
    fn timezone_is_never_empty() {
        let raw = RawSchedule { timezone: Some("  ".to_string()), ..cron("0 6 * * *") };
        let spec = build_schedule(Some(&raw), "").unwrap().unwrap();
        assert_eq!(spec.timezone(), "UTC");
    }

    #[test]
    fn only_timezone_is_not_an_empty_schedule() {
        let raw = RawSchedule { timezone: Some("UTC".to_string()), ..Default::default() };
        assert_eq!(build_schedule(Some(&raw), "UTC"), Err(ScheduleError::MissingCronExpression));
    }

    #[test]
    fn serializes_interval_as_seconds() {
        let spec =
            ScheduleSpec::Interval { period: Duration::from_secs(900), timezone: "UTC".into() };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "interval", "every_seconds": 900, "timezone": "UTC"})
        );
        assert_eq!(spec.describe(), "every 900s (UTC)");
    }
}
