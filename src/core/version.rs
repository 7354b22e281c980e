use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Semantic version extracted from a milestone title.
///
/// A milestone whose title carries no parseable version is unschedulable
/// and excluded from the roadmap entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)").expect("static version pattern"))
}

impl Version {
    /// Parses the first `major.minor.patch` substring of a title.
    #[must_use]
    pub fn parse(title: &str) -> Option<Self> {
        let captures = version_pattern().captures(title)?;
        Some(Self {
            major: captures.get(1)?.as_str().parse().ok()?,
            minor: captures.get(2)?.as_str().parse().ok()?,
            patch: captures.get(3)?.as_str().parse().ok()?,
        })
    }

    /// A major release closes a `x.y` line: the patch component is zero.
    #[must_use]
    pub fn is_major(self) -> bool {
        self.patch == 0
    }

    /// The `major.minor` series key that groups successive patches.
    #[must_use]
    pub fn series(self) -> (u64, u64) {
        (self.major, self.minor)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
