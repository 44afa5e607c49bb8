use chrono::{Duration, NaiveDate};

use crate::cost::model::CostRecord;

/// Inclusive length of one feeding period, in days.
pub const PERIOD_DAYS: i64 = 7;

/// An inclusive 7-day feeding window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedingPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FeedingPeriod {
    /// Builds the window that starts on `start` and spans 7 days inclusive.
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start_date: start,
            end_date: start + Duration::days(PERIOD_DAYS - 1),
        }
    }
}

/// Outcome of resolving the next period for a shed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodDecision {
    /// Create a record spanning this window.
    NewPeriod(FeedingPeriod),
    /// The submission re-processes an already recorded period; create
    /// nothing and report success.
    AlreadyRecorded,
}

/// Determines the next feeding period for a shed.
///
/// With no history the schedule starts at the flock's arrival date. With a
/// most-recent record, the next window begins the day after it ends, unless
/// the previous record's own start equals that expected start, which marks a
/// duplicate submission of the same request and resolves to a skip.
/// Never merges or splits windows; one invocation yields at most one new
/// period.
pub fn resolve_period(
    most_recent: Option<&CostRecord>,
    flock_arrival: NaiveDate,
) -> PeriodDecision {
    match most_recent {
        None => PeriodDecision::NewPeriod(FeedingPeriod::starting(flock_arrival)),
        Some(previous) => {
            let expected_start = previous.end_date + Duration::days(1);
            if previous.start_date == expected_start {
                PeriodDecision::AlreadyRecorded
            } else {
                PeriodDecision::NewPeriod(FeedingPeriod::starting(expected_start))
            }
        }
    }
}
