//! Time specification parsing and due-time helpers.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use cron::Schedule;

use cronhost_core::error::SchedulerError;

/// Parse a 6-field time specification (`sec min hour dom mon dow`).
///
/// Each field accepts `*`, a literal, a `*/N` step, an `A-B` range, or a
/// comma-separated list of those. Anything that is not exactly 6 fields is
/// rejected up front so callers get a clear diagnostic instead of the cron
/// parser's generic error.
pub fn parse_spec(spec: &str) -> Result<Schedule, SchedulerError> {
    let trimmed = spec.trim();
    let fields = trimmed.split_whitespace().count();
    if fields != 6 {
        return Err(SchedulerError::WrongFieldCount {
            spec: trimmed.to_string(),
            fields,
        });
    }
    Schedule::from_str(trimmed).map_err(|source| SchedulerError::InvalidSpec {
        spec: trimmed.to_string(),
        source,
    })
}

/// First scheduled instant strictly after `after`, if the schedule has one.
pub(crate) fn next_due(schedule: &Schedule, after: &DateTime<Utc>) -> Option<DateTime<Utc>> {
    schedule.after(after).next()
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_second() {
        assert!(parse_spec("*/1 * * * * *").is_ok());
    }

    #[test]
    fn parse_steps_ranges_lists() {
        assert!(parse_spec("*/5 * * * * *").is_ok());
        assert!(parse_spec("0 0 9-17 * * 1-5").is_ok());
        assert!(parse_spec("0,30 * * * * *").is_ok());
        assert!(parse_spec("0 */10 8-18,20 1,15 * *").is_ok());
    }

    #[test]
    fn parse_trims_whitespace() {
        assert!(parse_spec("  */5 * * * * *  ").is_ok());
    }

    #[test]
    fn reject_five_fields() {
        let err = parse_spec("*/5 * * * *").unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::WrongFieldCount { fields: 5, .. }
        ));
    }

    #[test]
    fn reject_seven_fields() {
        let err = parse_spec("0 0 0 1 1 * 2099").unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::WrongFieldCount { fields: 7, .. }
        ));
    }

    #[test]
    fn reject_garbage_field() {
        let err = parse_spec("x * * * * *").unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidSpec { .. }));
    }

    #[test]
    fn next_due_is_within_resolution() {
        let schedule = parse_spec("*/1 * * * * *").unwrap();
        let now = Utc::now();
        let next = next_due(&schedule, &now).unwrap();
        assert!(next > now);
        assert!((next - now).num_milliseconds() <= 1_000);
    }
}
