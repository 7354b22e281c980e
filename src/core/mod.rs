pub mod calendar;
pub mod classifier;
pub mod clock;
pub mod packer;
pub mod scheduler;
pub mod types;
pub mod version;

pub use calendar::{DAY_MS, Timeline, TimelineQuarter, TimelineScale, quarter_for};
pub use classifier::{QuarterBuckets, classify, priority_rank};
pub use clock::{Clock, FixedClock, SystemClock};
pub use packer::{TrackLayout, pack};
pub use scheduler::schedule;
pub use types::{
    DEFAULT_POINTS, Issue, IssuePriority, IssueState, Milestone, MilestoneState, PlanningWindow,
    PositionedIssue, Quarter,
};
pub use version::Version;
