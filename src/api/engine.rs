use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::api::layout::layout_all_rows;
use crate::api::{MilestoneProvider, QuarterColumn, RoadmapSnapshot};
use crate::core::calendar::add_months;
use crate::core::{Clock, Issue, Milestone, Timeline, schedule};
use crate::error::{RoadmapError, RoadmapResult};

/// Engine construction options.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoadmapEngineConfig {
    pub display_date: Option<DateTime<Utc>>,
}

impl RoadmapEngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the initial display date instead of starting at `clock.now()`.
    #[must_use]
    pub fn with_display_date(mut self, display_date: DateTime<Utc>) -> Self {
        self.display_date = Some(display_date);
        self
    }
}

/// Token tying an in-flight data load to the period it was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadCycle {
    generation: u64,
}

/// Result of applying a data load against the engine's current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// The display period changed while the load was in flight; the
    /// results were discarded.
    Stale,
}

/// Composes the scheduling/layout core behind a period-navigation surface.
///
/// The engine owns the display date and the derived timeline, holds the
/// latest scheduled milestones with their issue lists, and recomputes a full
/// [`RoadmapSnapshot`] from scratch on demand.
pub struct RoadmapEngine<C: Clock> {
    clock: C,
    display_date: DateTime<Utc>,
    timeline: Timeline,
    milestones: Vec<Milestone>,
    issues_by_milestone: IndexMap<String, Vec<Issue>>,
    generation: u64,
}

impl<C: Clock> RoadmapEngine<C> {
    pub fn new(clock: C, config: RoadmapEngineConfig) -> RoadmapResult<Self> {
        let display_date = config.display_date.unwrap_or_else(|| clock.now());
        let timeline = Timeline::for_display_date(display_date)?;
        Ok(Self {
            clock,
            display_date,
            timeline,
            milestones: Vec::new(),
            issues_by_milestone: IndexMap::new(),
            generation: 0,
        })
    }

    /// Replaces the milestone set, running the version scheduler.
    ///
    /// Unversioned milestones are dropped; the rest get fresh due dates and
    /// are stored sorted by due date. Issue lists for milestones no longer
    /// present are discarded.
    pub fn set_milestones(&mut self, milestones: Vec<Milestone>) -> RoadmapResult<()> {
        let now = self.clock.now();
        let mut scheduled = schedule(&milestones, now)?;
        scheduled.sort_by_key(|milestone| milestone.due_on);
        debug!(
            input_count = milestones.len(),
            scheduled_count = scheduled.len(),
            "set milestones"
        );
        self.issues_by_milestone
            .retain(|id, _| scheduled.iter().any(|milestone| milestone.id == *id));
        self.milestones = scheduled;
        Ok(())
    }

    /// Replaces one milestone's issue list. Ignored for unknown milestones.
    pub fn set_issues(&mut self, milestone_id: &str, issues: Vec<Issue>) {
        if !self
            .milestones
            .iter()
            .any(|milestone| milestone.id == milestone_id)
        {
            warn!(milestone_id, "ignoring issues for unknown milestone");
            return;
        }
        trace!(milestone_id, count = issues.len(), "set issues");
        self.issues_by_milestone
            .insert(milestone_id.to_owned(), issues);
    }

    /// Shifts the display date by whole months and regenerates the timeline.
    pub fn change_period(&mut self, delta_months: i32) -> RoadmapResult<()> {
        self.display_date = add_months(self.display_date, delta_months)?;
        self.rebuild_timeline()
    }

    /// Returns the display date to `clock.now()` and regenerates the
    /// timeline. Idempotent: repeated calls yield identical timelines.
    pub fn reset_period(&mut self) -> RoadmapResult<()> {
        self.display_date = self.clock.now();
        self.rebuild_timeline()
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[must_use]
    pub fn display_date(&self) -> DateTime<Utc> {
        self.display_date
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Computes a full roadmap snapshot for the current period.
    pub fn snapshot(&self) -> RoadmapResult<RoadmapSnapshot> {
        let now = self.clock.now();
        let rows = layout_all_rows(&self.milestones, &self.issues_by_milestone, &self.timeline, now)?;
        Ok(RoadmapSnapshot {
            quarters: self
                .timeline
                .quarters()
                .iter()
                .map(|timeline_quarter| QuarterColumn {
                    name: timeline_quarter.quarter.name.clone(),
                    month_count: timeline_quarter.month_count,
                })
                .collect(),
            months: self.timeline.months().to_vec(),
            today_offset_percentage: self.timeline.today_offset_percentage(now),
            rows,
        })
    }

    /// Starts a load cycle pinned to the current display period.
    #[must_use]
    pub fn begin_load(&self) -> LoadCycle {
        LoadCycle {
            generation: self.generation,
        }
    }

    /// Applies fetched data, unless the display period moved since the
    /// cycle began; stale results are discarded without touching state.
    pub fn apply_load(
        &mut self,
        cycle: LoadCycle,
        milestones: Vec<Milestone>,
        issue_sets: Vec<(String, Vec<Issue>)>,
    ) -> RoadmapResult<RefreshOutcome> {
        if cycle.generation != self.generation {
            debug!(
                cycle_generation = cycle.generation,
                current_generation = self.generation,
                "discarding stale load cycle"
            );
            return Ok(RefreshOutcome::Stale);
        }
        self.set_milestones(milestones)?;
        for (milestone_id, issues) in issue_sets {
            self.set_issues(&milestone_id, issues);
        }
        Ok(RefreshOutcome::Applied)
    }

    /// Runs one full fetch cycle against a provider.
    ///
    /// A milestone fetch failure clears all engine data and surfaces one
    /// error. A per-milestone issue fetch failure degrades to an empty
    /// issue list for that milestone only. No retries.
    pub fn refresh_from<P: MilestoneProvider>(
        &mut self,
        provider: &P,
    ) -> RoadmapResult<RefreshOutcome> {
        let cycle = self.begin_load();

        let milestones = match provider.fetch_milestones() {
            Ok(milestones) => milestones,
            Err(source) => {
                self.clear();
                return Err(RoadmapError::MilestoneFetch { source });
            }
        };

        // Only scheduled milestones appear on the roadmap, so only those
        // are worth an issue fetch.
        let scheduled = schedule(&milestones, self.clock.now())?;
        let mut issue_sets = Vec::with_capacity(scheduled.len());
        for milestone in &scheduled {
            let issues = provider.fetch_issues(&milestone.id).unwrap_or_else(|error| {
                warn!(
                    milestone_id = %milestone.id,
                    %error,
                    "issue fetch failed, substituting empty list"
                );
                Vec::new()
            });
            issue_sets.push((milestone.id.clone(), issues));
        }

        self.apply_load(cycle, milestones, issue_sets)
    }

    fn rebuild_timeline(&mut self) -> RoadmapResult<()> {
        self.timeline = Timeline::for_display_date(self.display_date)?;
        self.generation += 1;
        debug!(
            generation = self.generation,
            start = %self.timeline.start(),
            end = %self.timeline.end(),
            "rebuilt timeline"
        );
        Ok(())
    }

    fn clear(&mut self) {
        self.milestones.clear();
        self.issues_by_milestone.clear();
    }
}
