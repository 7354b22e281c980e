use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::trace;

use crate::core::calendar::quarter_for;
use crate::core::{Issue, IssuePriority, IssueState, Quarter};
use crate::error::RoadmapResult;

/// Open and closed issues of one milestone falling into one quarter.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterBuckets {
    pub quarter: Quarter,
    pub open: Vec<Issue>,
    pub closed: Vec<Issue>,
}

impl QuarterBuckets {
    fn new(quarter: Quarter) -> Self {
        Self {
            quarter,
            open: Vec::new(),
            closed: Vec::new(),
        }
    }
}

/// Buckets one milestone's issues per quarter.
///
/// The map is seeded with every visible quarter, in visible order, so
/// iteration over the result is deterministic. Closed issues bucket by
/// the quarter containing `closed_at` regardless of the milestone's due
/// date. Open issues bucket by the milestone's due quarter (falling back
/// to the current quarter) with one exception: when the due quarter lies
/// in the past, the issue relocates into the current quarter's open
/// bucket, and only if that quarter is present in the map already.
pub fn classify(
    issues: &[Issue],
    milestone_due_on: Option<DateTime<Utc>>,
    visible_quarters: &[Quarter],
    now: DateTime<Utc>,
) -> RoadmapResult<IndexMap<String, QuarterBuckets>> {
    let mut buckets: IndexMap<String, QuarterBuckets> =
        IndexMap::with_capacity(visible_quarters.len());
    for quarter in visible_quarters {
        buckets.insert(quarter.name.clone(), QuarterBuckets::new(quarter.clone()));
    }

    let current = quarter_for(now)?;

    for issue in issues {
        match issue.state {
            IssueState::Closed => {
                let Some(closed_at) = issue.closed_at else {
                    trace!(issue = issue.number, "closed issue without closed_at, skipping");
                    continue;
                };
                let quarter = quarter_for(closed_at)?;
                buckets
                    .entry(quarter.name.clone())
                    .or_insert_with(|| QuarterBuckets::new(quarter))
                    .closed
                    .push(issue.clone());
            }
            IssueState::Open => {
                let target = match milestone_due_on {
                    Some(due_on) => quarter_for(due_on)?,
                    None => current.clone(),
                };
                if target.start_ms < current.start_ms {
                    // Overdue milestone: show the issue in the current quarter,
                    // but only when that quarter is on screen.
                    match buckets.get_mut(&current.name) {
                        Some(bucket) => bucket.open.push(issue.clone()),
                        None => trace!(
                            issue = issue.number,
                            quarter = %current.name,
                            "current quarter not visible, dropping overdue issue"
                        ),
                    }
                } else {
                    buckets
                        .entry(target.name.clone())
                        .or_insert_with(|| QuarterBuckets::new(target))
                        .open
                        .push(issue.clone());
                }
            }
        }
    }

    for bucket in buckets.values_mut() {
        sort_bucket(&mut bucket.open);
        sort_bucket(&mut bucket.closed);
    }

    Ok(buckets)
}

/// Priority rank used for layout ordering: critical first, unknown last.
///
/// Names match by case-insensitive substring, so "P1 - Critical" ranks
/// the same as "critical".
#[must_use]
pub fn priority_rank(priority: Option<&IssuePriority>) -> u8 {
    let Some(priority) = priority else {
        return 5;
    };
    let name = priority.name.to_lowercase();
    if name.contains("critical") {
        1
    } else if name.contains("high") {
        2
    } else if name.contains("medium") {
        3
    } else if name.contains("low") {
        4
    } else {
        5
    }
}

fn sort_bucket(issues: &mut [Issue]) {
    issues.sort_by(|a, b| {
        priority_rank(a.priority.as_ref())
            .cmp(&priority_rank(b.priority.as_ref()))
            .then_with(|| b.points_or_default().cmp(&a.points_or_default()))
            .then_with(|| b.number.cmp(&a.number))
    });
}
