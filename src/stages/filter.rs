//! Contig filter.
//!
//! Removes records on alternate haplotype contigs, fix patches and
//! (optionally) chromosomes outside the standard set.

use crate::config::{PipelineConfig, ProcessOptions};
use crate::diagnostics::{Diagnostic, ExclusionReason};
use crate::interval::GeneInterval;

/// Contig filter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContigFilter {
    /// Drop chromosomes containing the alt pattern
    pub remove_alt: bool,
    /// Drop chromosomes containing the fix pattern
    pub remove_fix: bool,
    /// Drop chromosomes outside the standard set
    pub standard_only: bool,
}

impl Default for ContigFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContigFilter {
    /// A filter with every predicate disabled.
    pub fn new() -> Self {
        Self {
            remove_alt: false,
            remove_fix: false,
            standard_only: false,
        }
    }

    pub fn from_options(options: &ProcessOptions) -> Self {
        Self {
            remove_alt: options.remove_alt,
            remove_fix: options.remove_fix,
            standard_only: !options.include_non_standard,
        }
    }

    /// First active predicate the chromosome matches, if any.
    #[inline]
    pub fn exclusion(&self, chrom: &str, config: &PipelineConfig) -> Option<ExclusionReason> {
        if self.remove_alt && !config.alt_pattern.is_empty() && chrom.contains(&config.alt_pattern)
        {
            return Some(ExclusionReason::AltContig);
        }
        if self.remove_fix && !config.fix_pattern.is_empty() && chrom.contains(&config.fix_pattern)
        {
            return Some(ExclusionReason::FixPatch);
        }
        if self.standard_only && !config.is_standard(chrom) {
            return Some(ExclusionReason::NonStandard);
        }
        None
    }

    /// Keep records matching no active predicate.
    pub fn apply(
        &self,
        intervals: Vec<GeneInterval>,
        config: &PipelineConfig,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<GeneInterval> {
        let mut kept = Vec::with_capacity(intervals.len());

        for interval in intervals {
            match self.exclusion(&interval.chrom, config) {
                Some(reason) => diagnostics.push(Diagnostic::ContigExcluded {
                    gene: interval.gene,
                    chrom: interval.chrom,
                    reason,
                }),
                None => kept.push(interval),
            }
        }

        kept
    }
}
