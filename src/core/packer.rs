use smallvec::SmallVec;

use crate::core::calendar::{DAY_MS, TimelineScale};
use crate::core::{Issue, PlanningWindow, PositionedIssue};

/// One day of breathing room per issue in the capacity estimate.
const TRACK_GAP_MS: i64 = DAY_MS;

/// Minimum bar width as a share of the visible timeline.
const MIN_WIDTH_RATIO: f64 = 0.03;
const MIN_WIDTH_PERCENT: f64 = 3.0;

/// Issues of one bucket laid out into non-overlapping tracks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackLayout {
    pub issues: Vec<PositionedIssue>,
    pub track_count: usize,
}

/// Packs an already-sorted issue list into the planning window.
///
/// Track count comes from a greedy capacity estimate, not an exact bin
/// packer; pathological duration mixes may under-allocate and overflow a
/// track, which clips rather than re-laying out. Issues are distributed
/// round-robin so priorities interleave across tracks, then each track
/// spreads its issues with even whitespace gaps.
#[must_use]
pub fn pack(issues: &[Issue], window: PlanningWindow, scale: TimelineScale) -> TrackLayout {
    if issues.is_empty() || window.is_degenerate() {
        return TrackLayout::default();
    }

    let window_duration = window.duration_ms();
    let timeline_ms = scale.total_days as f64 * DAY_MS as f64;
    let min_width_ms = (scale.total_days as f64 * MIN_WIDTH_RATIO * DAY_MS as f64) as i64;

    // One day per point, floored at the minimum visible width.
    let durations: Vec<i64> = issues
        .iter()
        .map(|issue| (i64::from(issue.points_or_default()) * DAY_MS).max(min_width_ms))
        .collect();

    let padded_total: i64 =
        durations.iter().sum::<i64>() + (issues.len() as i64 - 1) * TRACK_GAP_MS;
    let track_count = ((padded_total as f64 / window_duration as f64).ceil() as usize).max(1);

    let mut tracks: Vec<SmallVec<[usize; 8]>> = vec![SmallVec::new(); track_count];
    for index in 0..issues.len() {
        tracks[index % track_count].push(index);
    }

    let mut positioned = Vec::with_capacity(issues.len());
    let mut populated = 0;
    for (track, members) in tracks.iter().enumerate() {
        if members.is_empty() {
            continue;
        }
        populated += 1;

        let used: i64 = members.iter().map(|&index| durations[index]).sum();
        let whitespace = window_duration - used;
        let gap = if whitespace > 0 {
            whitespace as f64 / (members.len() + 1) as f64
        } else {
            0.0
        };

        let mut cursor = window.start_ms as f64 + gap;
        for &index in members {
            let duration = durations[index] as f64;
            positioned.push(PositionedIssue {
                issue_id: issues[index].id.clone(),
                issue_number: issues[index].number,
                track,
                left_percent: (cursor - scale.start_ms as f64) / timeline_ms * 100.0,
                width_percent: (duration / DAY_MS as f64 / scale.total_days as f64 * 100.0)
                    .max(MIN_WIDTH_PERCENT),
            });
            cursor += duration + gap;
        }
    }

    TrackLayout {
        issues: positioned,
        track_count: populated,
    }
}
