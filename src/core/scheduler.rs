use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::core::calendar::{add_months, last_day_of_quarter};
use crate::core::{Milestone, Version};
use crate::error::RoadmapResult;

/// Assigns every schedulable milestone a due date derived from its version.
///
/// Majors (patch 0) occupy successive quarters starting from `now`, one per
/// quarter in version order. Minors run the same cursor per `major.minor`
/// series, resetting to `now` whenever the series changes, so patch trains
/// advance independently of each other.
///
/// Any due date already present on the input is overwritten; milestones
/// without a parseable version are dropped from the output entirely.
/// Returned order is not significant.
pub fn schedule(milestones: &[Milestone], now: DateTime<Utc>) -> RoadmapResult<Vec<Milestone>> {
    let mut majors: Vec<(Version, &Milestone)> = Vec::new();
    let mut minors: Vec<(Version, &Milestone)> = Vec::new();

    for milestone in milestones {
        match Version::parse(&milestone.title) {
            Some(version) if version.is_major() => majors.push((version, milestone)),
            Some(version) => minors.push((version, milestone)),
            None => {
                trace!(
                    milestone_id = %milestone.id,
                    title = %milestone.title,
                    "milestone title has no version, excluding from schedule"
                );
            }
        }
    }

    majors.sort_by_key(|(version, _)| *version);
    minors.sort_by_key(|(version, _)| *version);

    let mut scheduled = Vec::with_capacity(majors.len() + minors.len());

    let mut cursor = now;
    for (version, milestone) in &majors {
        let due_on = last_day_of_quarter(cursor)?;
        trace!(milestone_id = %milestone.id, %version, due_on = %due_on, "scheduled major");
        scheduled.push(milestone.with_due_on(due_on));
        cursor = add_months(cursor, 3)?;
    }

    let mut cursor = now;
    let mut series = None;
    for (version, milestone) in &minors {
        if series != Some(version.series()) {
            cursor = now;
            series = Some(version.series());
        }
        let due_on = last_day_of_quarter(cursor)?;
        trace!(milestone_id = %milestone.id, %version, due_on = %due_on, "scheduled minor");
        scheduled.push(milestone.with_due_on(due_on));
        cursor = add_months(cursor, 3)?;
    }

    debug!(
        input = milestones.len(),
        majors = majors.len(),
        minors = minors.len(),
        "milestone schedule computed"
    );

    Ok(scheduled)
}
