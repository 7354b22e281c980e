use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::core::Quarter;
use crate::error::{RoadmapError, RoadmapResult};

pub const DAY_MS: i64 = 86_400_000;

const HALF_YEAR_MONTHS: u32 = 6;

/// The fixed 6-calendar-month visible range, aligned to year halves.
///
/// A display date in January through June maps to the first half of its
/// year, anything later to the second half. Recomputed from scratch on
/// every period change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    start: NaiveDate,
    end: NaiveDate,
    months: Vec<NaiveDate>,
    quarters: Vec<TimelineQuarter>,
    total_days: i64,
}

/// One visible quarter column, tagged with how many timeline months it
/// spans for weighted-grid rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineQuarter {
    pub quarter: Quarter,
    pub month_count: u32,
}

/// Scalars needed to map absolute instants onto timeline percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineScale {
    pub start_ms: i64,
    pub total_days: i64,
}

impl Timeline {
    pub fn for_display_date(display_date: DateTime<Utc>) -> RoadmapResult<Self> {
        let date = display_date.date_naive();
        let start_month = if date.month() <= 6 { 1 } else { 7 };
        let start = ymd(date.year(), start_month, 1)?;
        let end_exclusive = add_months_date(start, HALF_YEAR_MONTHS)?;
        let end = end_exclusive
            .pred_opt()
            .ok_or_else(|| RoadmapError::InvalidData("timeline end underflow".to_owned()))?;

        let mut months = Vec::with_capacity(HALF_YEAR_MONTHS as usize);
        for offset in 0..HALF_YEAR_MONTHS {
            months.push(add_months_date(start, offset)?);
        }

        let mut quarters = Vec::with_capacity(2);
        for offset in [0, 3] {
            let quarter = quarter_for_date(add_months_date(start, offset)?)?;
            let month_count = months
                .iter()
                .filter(|month| {
                    let ms = date_to_ms(**month);
                    ms >= quarter.start_ms && ms < quarter.end_ms
                })
                .count() as u32;
            quarters.push(TimelineQuarter {
                quarter,
                month_count,
            });
        }

        let total_days = (end_exclusive - start).num_days();

        Ok(Self {
            start,
            end,
            months,
            quarters,
            total_days,
        })
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range, inclusive.
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    #[must_use]
    pub fn quarters(&self) -> &[TimelineQuarter] {
        &self.quarters
    }

    /// Exact elapsed-day count between the start and end instants
    /// (first-half years span 181 or 182 days, second halves 184).
    #[must_use]
    pub fn total_days(&self) -> i64 {
        self.total_days
    }

    #[must_use]
    pub fn start_ms(&self) -> i64 {
        date_to_ms(self.start)
    }

    /// First instant past the range.
    #[must_use]
    pub fn end_ms(&self) -> i64 {
        date_to_ms(self.end) + DAY_MS
    }

    #[must_use]
    pub fn scale(&self) -> TimelineScale {
        TimelineScale {
            start_ms: self.start_ms(),
            total_days: self.total_days,
        }
    }

    /// Fractional days from the timeline start to `now`, as a percentage of
    /// the full range. Used for the initial scroll position only, never for
    /// layout; it is not clamped when `now` falls outside the range.
    #[must_use]
    pub fn today_offset_percentage(&self, now: DateTime<Utc>) -> f64 {
        let elapsed_days = (now.timestamp_millis() - self.start_ms()) as f64 / DAY_MS as f64;
        elapsed_days / self.total_days as f64 * 100.0
    }
}

/// The quarter containing an arbitrary instant, visible or not.
pub fn quarter_for(instant: DateTime<Utc>) -> RoadmapResult<Quarter> {
    quarter_for_date(instant.date_naive())
}

pub fn quarter_for_date(date: NaiveDate) -> RoadmapResult<Quarter> {
    let index = date.month0() / 3;
    let start = ymd(date.year(), index * 3 + 1, 1)?;
    let end_exclusive = add_months_date(start, 3)?;
    Ok(Quarter {
        name: format!("Q{} {}", index + 1, date.year()),
        start_ms: date_to_ms(start),
        end_ms: date_to_ms(end_exclusive),
    })
}

/// Midnight of the last calendar day of the quarter containing `instant`.
pub fn last_day_of_quarter(instant: DateTime<Utc>) -> RoadmapResult<DateTime<Utc>> {
    let quarter = quarter_for(instant)?;
    ms_to_datetime(quarter.end_ms - DAY_MS)
}

/// Shifts an instant by a signed number of calendar months.
pub fn add_months(instant: DateTime<Utc>, delta_months: i32) -> RoadmapResult<DateTime<Utc>> {
    let shifted = if delta_months >= 0 {
        instant.checked_add_months(Months::new(delta_months as u32))
    } else {
        instant.checked_sub_months(Months::new(delta_months.unsigned_abs()))
    };
    shifted.ok_or_else(|| {
        RoadmapError::InvalidData(format!("cannot shift {instant} by {delta_months} months"))
    })
}

/// First instant of the day after the one containing `now`. Quarter
/// windows split on this boundary so "today" counts as still open.
#[must_use]
pub fn end_of_today_ms(now: DateTime<Utc>) -> i64 {
    date_to_ms(now.date_naive()) + DAY_MS
}

pub(crate) fn ms_to_datetime(ms: i64) -> RoadmapResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .ok_or_else(|| RoadmapError::InvalidData(format!("timestamp {ms} out of range")))
}

fn add_months_date(date: NaiveDate, months: u32) -> RoadmapResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| RoadmapError::InvalidData(format!("cannot shift {date} by {months} months")))
}

fn ymd(year: i32, month: u32, day: u32) -> RoadmapResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        RoadmapError::InvalidData(format!("invalid calendar date {year}-{month:02}-{day:02}"))
    })
}

fn date_to_ms(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}
