//! Region extender.
//!
//! Extends intervals by a fixed number of bases on both sides. The start is
//! clamped at 0; there is no upper clamp since chromosome lengths are not
//! known here.

use crate::bed::Result;
use crate::config::ProcessOptions;
use crate::interval::GeneInterval;

/// Region extender configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionExtender {
    /// Number of bases to extend on both sides
    pub both: u64,
}

impl RegionExtender {
    pub fn new(both: u64) -> Self {
        Self { both }
    }

    /// Build from caller options, rejecting a negative extension.
    pub fn from_options(options: &ProcessOptions) -> Result<Self> {
        Ok(Self::new(options.validated_extend()?))
    }

    /// Apply the extension to a single record.
    #[inline]
    pub fn extend_record(&self, interval: &mut GeneInterval) {
        interval.start = interval.start.saturating_sub(self.both);
        interval.end = interval.end.saturating_add(self.both);
    }

    pub fn apply(&self, mut intervals: Vec<GeneInterval>) -> Vec<GeneInterval> {
        if self.both == 0 {
            return intervals;
        }
        for interval in &mut intervals {
            self.extend_record(interval);
        }
        intervals
    }
}
