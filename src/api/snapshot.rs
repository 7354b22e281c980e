use chrono::NaiveDate;
use serde::Serialize;

use crate::api::MilestoneRow;

/// One visible quarter column of the snapshot grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuarterColumn {
    pub name: String,
    pub month_count: u32,
}

/// Everything a host needs to render one roadmap pass.
///
/// Recomputed from scratch on every call; there is no incremental or
/// persisted layout state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapSnapshot {
    pub quarters: Vec<QuarterColumn>,
    pub months: Vec<NaiveDate>,
    pub today_offset_percentage: f64,
    pub rows: Vec<MilestoneRow>,
}

impl RoadmapSnapshot {
    /// JSON form for hosts that render out of process.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
