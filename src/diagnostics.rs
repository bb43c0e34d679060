//! Non-fatal pipeline diagnostics.
//!
//! Every change the pipeline makes to the caller's data (dropping, widening,
//! swapping or relocating a record) is described by one entry.

use serde::Serialize;
use std::fmt;

/// Why a contig was excluded by the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    AltContig,
    FixPatch,
    NonStandard,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::AltContig => write!(f, "alternate haplotype contig"),
            ExclusionReason::FixPatch => write!(f, "fix patch contig"),
            ExclusionReason::NonStandard => write!(f, "non-standard chromosome"),
        }
    }
}

/// How a degenerate interval was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateAction {
    Widened,
    Dropped,
}

/// A non-fatal condition reported alongside a successful result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A gene's entries span more than one chromosome.
    AmbiguousGeneLocation {
        gene: String,
        chromosomes: Vec<String>,
        chosen: String,
    },
    /// start == end before normalization.
    DegenerateInterval {
        gene: String,
        chrom: String,
        position: u64,
        action: DegenerateAction,
    },
    /// start > end on input; the coordinates were swapped.
    ReversedCoordinates {
        gene: String,
        chrom: String,
        start: u64,
        end: u64,
    },
    /// The record was removed by the contig filter.
    ContigExcluded {
        gene: String,
        chrom: String,
        reason: ExclusionReason,
    },
}

impl Diagnostic {
    /// Gene the diagnostic refers to.
    pub fn gene(&self) -> &str {
        match self {
            Diagnostic::AmbiguousGeneLocation { gene, .. }
            | Diagnostic::DegenerateInterval { gene, .. }
            | Diagnostic::ReversedCoordinates { gene, .. }
            | Diagnostic::ContigExcluded { gene, .. } => gene,
        }
    }

    /// Whether the condition lost or relocated caller data.
    pub fn is_warning(&self) -> bool {
        !matches!(self, Diagnostic::ReversedCoordinates { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::AmbiguousGeneLocation {
                gene,
                chromosomes,
                chosen,
            } => write!(
                f,
                "{} found on multiple chromosomes ({}); using {}",
                gene,
                chromosomes.join(", "),
                chosen
            ),
            Diagnostic::DegenerateInterval {
                gene,
                chrom,
                position,
                action,
            } => match action {
                DegenerateAction::Widened => write!(
                    f,
                    "{} has zero length at {}:{}; widened to 1bp",
                    gene, chrom, position
                ),
                DegenerateAction::Dropped => write!(
                    f,
                    "{} has zero length at {}:{}; dropped",
                    gene, chrom, position
                ),
            },
            Diagnostic::ReversedCoordinates {
                gene,
                chrom,
                start,
                end,
            } => write!(
                f,
                "{} given as {}:{}-{} (start > end); swapped",
                gene, chrom, start, end
            ),
            Diagnostic::ContigExcluded {
                gene,
                chrom,
                reason,
            } => write!(f, "{} on {} removed: {}", gene, chrom, reason),
        }
    }
}
