//! roadmap-rs: milestone roadmap scheduling and layout engine.
//!
//! This crate turns plain milestone/issue records plus an injected clock into
//! pure scheduling and geometry data for a scrolling quarter timeline. It does
//! not fetch, persist, or render; those concerns belong to the host.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{RoadmapEngine, RoadmapEngineConfig};
pub use error::{RoadmapError, RoadmapResult};
