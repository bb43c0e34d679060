//! Pipeline configuration.
//!
//! Configuration is an immutable value handed to every pipeline call, so
//! concurrent invocations never observe each other's settings.

use crate::bed::{BedError, Result};
use crate::chrom::default_standard_chromosomes;
use rustc_hash::FxHashSet;
use std::str::FromStr;

/// Default padding applied on each side of a gene, in base pairs.
pub const DEFAULT_EXTEND_BP: i64 = 1000;

/// What to do with zero-length intervals (start == end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Turn the interval into a 1bp interval (end = start + 1).
    #[default]
    Widen,
    /// Remove the interval from the output.
    Drop,
}

impl FromStr for DegeneratePolicy {
    type Err = BedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "widen" => Ok(DegeneratePolicy::Widen),
            "drop" => Ok(DegeneratePolicy::Drop),
            _ => Err(BedError::invalid_parameter(
                "degenerate",
                s,
                "expected 'widen' or 'drop'",
            )),
        }
    }
}

/// Static settings shared by every pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    standard_chromosomes: FxHashSet<String>,
    /// Substring marking alternate haplotype contigs
    pub alt_pattern: String,
    /// Substring marking fix patch contigs
    pub fix_pattern: String,
    pub degenerate_policy: DegeneratePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self {
            standard_chromosomes: default_standard_chromosomes().into_iter().collect(),
            alt_pattern: "alt".to_string(),
            fix_pattern: "fix".to_string(),
            degenerate_policy: DegeneratePolicy::Widen,
        }
    }

    /// Replace the standard chromosome set.
    pub fn with_standard_chromosomes<I, S>(mut self, chroms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.standard_chromosomes = chroms.into_iter().map(Into::into).collect();
        self
    }

    /// Add chromosomes to the standard set (e.g. chrMT).
    pub fn with_extra_standard<I, S>(mut self, chroms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.standard_chromosomes
            .extend(chroms.into_iter().map(Into::into));
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    pub fn with_alt_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.alt_pattern = pattern.into();
        self
    }

    pub fn with_fix_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.fix_pattern = pattern.into();
        self
    }

    /// Check if chromosome is in the standard set.
    #[inline]
    pub fn is_standard(&self, chrom: &str) -> bool {
        self.standard_chromosomes.contains(chrom)
    }
}

/// Per-call options supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Bases added on each side. Signed so that negative input can be rejected.
    pub extend_bp: i64,
    pub remove_alt: bool,
    pub remove_fix: bool,
    pub include_non_standard: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self::for_table()
    }
}

impl ProcessOptions {
    /// Defaults for gene table files: every contig kept unless alt/fix.
    pub fn for_table() -> Self {
        Self {
            extend_bp: DEFAULT_EXTEND_BP,
            remove_alt: true,
            remove_fix: true,
            include_non_standard: true,
        }
    }

    /// Defaults for annotation lookup results: standard chromosomes only.
    pub fn for_lookup() -> Self {
        Self {
            include_non_standard: false,
            ..Self::for_table()
        }
    }

    pub fn with_extend(mut self, bp: i64) -> Self {
        self.extend_bp = bp;
        self
    }

    pub fn with_remove_alt(mut self, remove: bool) -> Self {
        self.remove_alt = remove;
        self
    }

    pub fn with_remove_fix(mut self, remove: bool) -> Self {
        self.remove_fix = remove;
        self
    }

    pub fn with_non_standard(mut self, include: bool) -> Self {
        self.include_non_standard = include;
        self
    }

    /// Validate options, returning the extension as an unsigned margin.
    pub fn validated_extend(&self) -> Result<u64> {
        u64::try_from(self.extend_bp).map_err(|_| {
            BedError::invalid_parameter(
                "extend_bp",
                self.extend_bp.to_string(),
                "extension must be zero or positive",
            )
        })
    }
}
