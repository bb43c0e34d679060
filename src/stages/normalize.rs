//! Position normalizer.
//!
//! Guarantees start < end: reversed intervals are swapped and zero-length
//! intervals are widened or dropped according to [`DegeneratePolicy`].

use crate::config::DegeneratePolicy;
use crate::diagnostics::{DegenerateAction, Diagnostic};
use crate::interval::GeneInterval;

#[derive(Debug, Clone, Copy, Default)]
pub struct PositionNormalizer {
    pub degenerate: DegeneratePolicy,
}

impl PositionNormalizer {
    pub fn new(degenerate: DegeneratePolicy) -> Self {
        Self { degenerate }
    }

    /// Normalize a single interval in place.
    /// Returns false if the interval must be removed.
    #[inline]
    pub fn normalize_record(
        &self,
        interval: &mut GeneInterval,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        if interval.start > interval.end {
            diagnostics.push(Diagnostic::ReversedCoordinates {
                gene: interval.gene.clone(),
                chrom: interval.chrom.clone(),
                start: interval.start,
                end: interval.end,
            });
            std::mem::swap(&mut interval.start, &mut interval.end);
            return true;
        }

        if interval.start == interval.end {
            let action = match self.degenerate {
                DegeneratePolicy::Widen => DegenerateAction::Widened,
                DegeneratePolicy::Drop => DegenerateAction::Dropped,
            };
            diagnostics.push(Diagnostic::DegenerateInterval {
                gene: interval.gene.clone(),
                chrom: interval.chrom.clone(),
                position: interval.start,
                action,
            });
            return match action {
                DegenerateAction::Widened => {
                    interval.end = interval.start.saturating_add(1);
                    // u64::MAX cannot be widened
                    interval.start < interval.end
                }
                DegenerateAction::Dropped => false,
            };
        }

        true
    }

    pub fn apply(
        &self,
        mut intervals: Vec<GeneInterval>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<GeneInterval> {
        intervals.retain_mut(|iv| self.normalize_record(iv, diagnostics));
        intervals
    }
}
