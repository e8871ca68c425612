/// Reasons a schedule sub-document cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("schedule type 'cron' requires a non-empty 'cron' expression")]
    MissingCronExpression,

    #[error(
        "invalid interval '{0}': expected <integer><unit> with unit s, m, h or d (e.g. \"15m\")"
    )]
    InvalidDurationFormat(String),

    #[error("schedule type 'interval' requires a non-empty 'every' duration")]
    MissingIntervalDuration,

    #[error("unsupported schedule type '{0}': expected 'cron' or 'interval'")]
    UnsupportedScheduleType(String),
}
