use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Story points assumed for issues that carry none.
pub const DEFAULT_POINTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneState {
    Open,
    Closed,
}

/// A planned release grouping issues, with an optional due date.
///
/// Immutable during a render pass: the scheduler returns new values with
/// `due_on` filled in rather than mutating shared records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub due_on: Option<DateTime<Utc>>,
    pub open_issue_count: u32,
    pub closed_issue_count: u32,
    pub state: MilestoneState,
}

impl Milestone {
    /// Returns a copy of this milestone carrying the given due date.
    #[must_use]
    pub fn with_due_on(&self, due_on: DateTime<Utc>) -> Self {
        Self {
            due_on: Some(due_on),
            ..self.clone()
        }
    }

    /// Share of closed issues as a rounded percentage, 0 when the
    /// milestone has no issues at all.
    #[must_use]
    pub fn progress_percentage(&self) -> u32 {
        let total = self.open_issue_count + self.closed_issue_count;
        if total == 0 {
            return 0;
        }
        (f64::from(self.closed_issue_count) / f64::from(total) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueState {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePriority {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub points: Option<u32>,
    pub closed_at: Option<DateTime<Utc>>,
    pub priority: Option<IssuePriority>,
}

impl Issue {
    #[must_use]
    pub fn points_or_default(&self) -> u32 {
        self.points.unwrap_or(DEFAULT_POINTS)
    }
}

/// A fixed 3-calendar-month bucket used for display columns and
/// issue classification. Bounds are UTC millisecond instants with an
/// exclusive end (the first instant of the next quarter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quarter {
    pub name: String,
    pub start_ms: i64,
    pub end_ms: i64,
}

/// A bounded interval issues are packed into, in UTC milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl PlanningWindow {
    #[must_use]
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.start_ms >= self.end_ms
    }

    #[must_use]
    pub fn duration_ms(self) -> i64 {
        self.end_ms - self.start_ms
    }
}

/// One issue placed on the timeline, in percent of the full visible range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedIssue {
    pub issue_id: String,
    pub issue_number: u64,
    pub track: usize,
    pub left_percent: f64,
    pub width_percent: f64,
}
