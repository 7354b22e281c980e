pub mod engine;
pub mod layout;
pub mod provider;
pub mod snapshot;

pub use engine::{LoadCycle, RefreshOutcome, RoadmapEngine, RoadmapEngineConfig};
pub use layout::{MilestoneRow, layout_all_rows, layout_row, split_windows};
pub use provider::MilestoneProvider;
pub use snapshot::{QuarterColumn, RoadmapSnapshot};
