use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::trace;

use crate::core::calendar::end_of_today_ms;
use crate::core::{
    Issue, Milestone, PlanningWindow, PositionedIssue, Quarter, Timeline, classify, pack,
};
use crate::error::RoadmapResult;

#[cfg(feature = "parallel-rows")]
use rayon::prelude::*;

/// One milestone's fully laid out roadmap row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MilestoneRow {
    pub milestone: Milestone,
    pub positioned_issues: Vec<PositionedIssue>,
    pub track_count: usize,
    pub progress_percentage: u32,
}

/// Lays out one milestone row: classify issues into quarter buckets, split
/// each visible quarter at today into a closed and an open window, and pack
/// both buckets independently.
///
/// Closed and open layouts both number tracks from 0; their windows are
/// temporally disjoint, so a closed and an open issue on track 0 share one
/// visual row. Buckets keyed by a quarter outside the visible timeline have
/// no window and are omitted.
pub fn layout_row(
    milestone: &Milestone,
    issues: &[Issue],
    timeline: &Timeline,
    now: DateTime<Utc>,
) -> RoadmapResult<MilestoneRow> {
    let visible: Vec<Quarter> = timeline
        .quarters()
        .iter()
        .map(|timeline_quarter| timeline_quarter.quarter.clone())
        .collect();
    let buckets = classify(issues, milestone.due_on, &visible, now)?;

    let today = end_of_today_ms(now);
    let scale = timeline.scale();

    let mut positioned_issues = Vec::new();
    let mut track_count = 0;
    for (name, bucket) in &buckets {
        if !visible.iter().any(|quarter| quarter.name == *name) {
            trace!(
                milestone_id = %milestone.id,
                quarter = %name,
                open = bucket.open.len(),
                closed = bucket.closed.len(),
                "quarter not visible, omitting bucket"
            );
            continue;
        }

        let (closed_window, open_window) = split_windows(&bucket.quarter, today);
        let closed_layout = pack(&bucket.closed, closed_window, scale);
        let open_layout = pack(&bucket.open, open_window, scale);

        track_count = track_count
            .max(closed_layout.track_count)
            .max(open_layout.track_count);
        positioned_issues.extend(closed_layout.issues);
        positioned_issues.extend(open_layout.issues);
    }

    Ok(MilestoneRow {
        milestone: milestone.clone(),
        positioned_issues,
        track_count,
        progress_percentage: milestone.progress_percentage(),
    })
}

/// Lays out every milestone row. Rows share no mutable state; with the
/// `parallel-rows` feature they are computed on the rayon pool.
pub fn layout_all_rows(
    milestones: &[Milestone],
    issues_by_milestone: &IndexMap<String, Vec<Issue>>,
    timeline: &Timeline,
    now: DateTime<Utc>,
) -> RoadmapResult<Vec<MilestoneRow>> {
    let row_for = |milestone: &Milestone| {
        let issues = issues_by_milestone
            .get(&milestone.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        layout_row(milestone, issues, timeline, now)
    };

    #[cfg(feature = "parallel-rows")]
    {
        milestones.par_iter().map(row_for).collect()
    }

    #[cfg(not(feature = "parallel-rows"))]
    {
        milestones.iter().map(row_for).collect()
    }
}

/// Splits a quarter at the end of the current day into the closed half
/// (history) and the open half (remaining work). Quarters entirely in the
/// past or future collapse the other half to a degenerate window.
#[must_use]
pub fn split_windows(quarter: &Quarter, today_end_ms: i64) -> (PlanningWindow, PlanningWindow) {
    if quarter.end_ms <= today_end_ms {
        (
            PlanningWindow::new(quarter.start_ms, quarter.end_ms),
            PlanningWindow::new(quarter.end_ms, quarter.end_ms),
        )
    } else if quarter.start_ms >= today_end_ms {
        (
            PlanningWindow::new(quarter.start_ms, quarter.start_ms),
            PlanningWindow::new(quarter.start_ms, quarter.end_ms),
        )
    } else {
        (
            PlanningWindow::new(quarter.start_ms, today_end_ms),
            PlanningWindow::new(today_end_ms, quarter.end_ms),
        )
    }
}
