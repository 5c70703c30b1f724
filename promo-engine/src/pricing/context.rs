//! Evaluation Context
//!
//! The evaluator never reads the wall clock. Callers pass the instant of
//! evaluation, already projected into the business timezone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Point in time an evaluation runs at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    /// Business-local wall time, used for weekday/hour windows
    pub now: NaiveDateTime,
    /// Absolute instant, used for validity windows and timestamps
    pub instant: DateTime<Utc>,
}

impl EvaluationContext {
    /// Context for an instant in any timezone; local fields come from `instant`'s offset
    pub fn at<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self {
            now: instant.naive_local(),
            instant: instant.with_timezone(&Utc),
        }
    }

    /// Context for a UTC instant seen from the business timezone
    pub fn in_timezone(instant: DateTime<Utc>, tz: chrono_tz::Tz) -> Self {
        Self::at(&instant.with_timezone(&tz))
    }

    /// Current time in the business timezone
    pub fn now_in(tz: chrono_tz::Tz) -> Self {
        Self::in_timezone(Utc::now(), tz)
    }

    /// Unix millis of the instant
    pub fn timestamp_millis(&self) -> i64 {
        self.instant.timestamp_millis()
    }

    /// Business-local calendar date
    pub fn local_date(&self) -> NaiveDate {
        self.now.date()
    }
}
