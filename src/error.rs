use thiserror::Error;

pub type RoadmapResult<T> = Result<T, RoadmapError>;

/// Failure reported by a [`crate::api::MilestoneProvider`] implementation.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RoadmapError {
    /// The top-level milestone fetch failed. Fatal to the render pass:
    /// engine state is cleared and the error is surfaced once.
    #[error("milestone fetch failed: {source}")]
    MilestoneFetch {
        #[source]
        source: ProviderError,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
