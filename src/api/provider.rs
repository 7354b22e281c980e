use crate::core::{Issue, Milestone};
use crate::error::ProviderError;

/// Data source the engine refreshes from.
///
/// Implementations wrap whatever transport the host uses; the engine only
/// sees plain records. Failure semantics are asymmetric: a milestone fetch
/// failure aborts the whole refresh, while a single issue fetch failure is
/// absorbed as an empty list for that milestone only.
pub trait MilestoneProvider {
    fn fetch_milestones(&self) -> Result<Vec<Milestone>, ProviderError>;

    fn fetch_issues(&self, milestone_id: &str) -> Result<Vec<Issue>, ProviderError>;
}
