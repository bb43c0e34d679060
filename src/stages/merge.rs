//! Gene merger.
//!
//! Collapses every group of intervals sharing a gene identifier into a single
//! interval spanning min(start)..max(end). Gene identifiers are compared
//! case-sensitively.

use crate::diagnostics::Diagnostic;
use crate::interval::{GeneInterval, Strand};
use crate::parallel::{group_by_gene, map_maybe_parallel};

#[derive(Debug, Clone, Copy, Default)]
pub struct GeneMerger;

impl GeneMerger {
    pub fn new() -> Self {
        Self
    }

    /// Merge intervals by gene. Output is in order of first appearance.
    pub fn apply(
        &self,
        intervals: Vec<GeneInterval>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<GeneInterval> {
        if intervals.is_empty() {
            return Vec::new();
        }

        let groups = group_by_gene(intervals);
        let merged = map_maybe_parallel(groups, |group| self.merge_group(group));

        let mut result = Vec::with_capacity(merged.len());
        for (interval, warning) in merged {
            diagnostics.extend(warning);
            result.push(interval);
        }
        result
    }

    /// Merge one group of intervals with the same gene. The group must not be empty.
    ///
    /// When entries disagree on chromosome, the widest entry picks the
    /// chromosome and only entries on that chromosome contribute to the span.
    pub(crate) fn merge_group(
        &self,
        mut group: Vec<GeneInterval>,
    ) -> (GeneInterval, Option<Diagnostic>) {
        let mut chromosomes: Vec<String> = Vec::new();
        for iv in &group {
            if !chromosomes.contains(&iv.chrom) {
                chromosomes.push(iv.chrom.clone());
            }
        }

        let mut seed = 0;
        let mut warning = None;
        if chromosomes.len() > 1 {
            // First entry wins ties
            for (i, iv) in group.iter().enumerate().skip(1) {
                if iv.len() > group[seed].len() {
                    seed = i;
                }
            }
            warning = Some(Diagnostic::AmbiguousGeneLocation {
                gene: group[seed].gene.clone(),
                chromosomes,
                chosen: group[seed].chrom.clone(),
            });
        }

        let mut merged = group.swap_remove(seed);
        let chrom = merged.chrom.clone();
        let mut strand: Option<Strand> = merged.strand;
        for iv in group.iter().filter(|iv| iv.chrom == chrom) {
            merged.start = merged.start.min(iv.start);
            merged.end = merged.end.max(iv.end);
            if strand != iv.strand {
                strand = None;
            }
        }
        merged.strand = strand;

        (merged, warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_passes_through() {
        let mut diags = Vec::new();
        let input = vec![GeneInterval::new("chr3", 10, 50, "ONLY").with_strand(Strand::Minus)];
        let out = GeneMerger::new().apply(input.clone(), &mut diags);

        assert_eq!(out, input);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_merge_min_max() {
        let mut diags = Vec::new();
        let out = GeneMerger::new().apply(
            vec![
                GeneInterval::new("chr1", 900, 1000, "GENE1"),
                GeneInterval::new("chr1", 950, 1100, "GENE1"),
                GeneInterval::new("chr1", 5000, 5100, "OTHER"),
                GeneInterval::new("chr1", 850, 920, "GENE1"),
            ],
            &mut diags,
        );

        assert_eq!(out.len(), 2);
        assert_eq!(out[0], GeneInterval::new("chr1", 850, 1100, "GENE1"));
        assert_eq!(out[1].gene, "OTHER");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_disjoint_entries_span_gap() {
        let mut diags = Vec::new();
        let out = GeneMerger::new().apply(
            vec![
                GeneInterval::new("chr1", 100, 200, "G"),
                GeneInterval::new("chr1", 1000, 2000, "G"),
            ],
            &mut diags,
        );
        assert_eq!((out[0].start, out[0].end), (100, 2000));
    }

    #[test]
    fn test_case_sensitive_keys() {
        let mut diags = Vec::new();
        let out = GeneMerger::new().apply(
            vec![
                GeneInterval::new("chr1", 1, 2, "Sox2"),
                GeneInterval::new("chr1", 3, 4, "SOX2"),
            ],
            &mut diags,
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_multi_chromosome_uses_widest() {
        let mut diags = Vec::new();
        let out = GeneMerger::new().apply(
            vec![
                GeneInterval::new("chrX", 100, 200, "PAR1"),
                GeneInterval::new("chrY", 100, 5000, "PAR1"),
                GeneInterval::new("chrX", 300, 400, "PAR1"),
            ],
            &mut diags,
        );

        assert_eq!(out, vec![GeneInterval::new("chrY", 100, 5000, "PAR1")]);
        assert_eq!(
            diags,
            vec![Diagnostic::AmbiguousGeneLocation {
                gene: "PAR1".into(),
                chromosomes: vec!["chrX".into(), "chrY".into()],
                chosen: "chrY".into(),
            }]
        );
    }

    #[test]
    fn test_multi_chromosome_tie_takes_first() {
        let mut diags = Vec::new();
        let out = GeneMerger::new().apply(
            vec![
                GeneInterval::new("chr5", 0, 100, "T"),
                GeneInterval::new("chr6", 0, 100, "T"),
            ],
            &mut diags,
        );
        assert_eq!(out[0].chrom, "chr5");
    }

    #[test]
    fn test_strand_conflict_cleared() {
        let mut diags = Vec::new();
        let out = GeneMerger::new().apply(
            vec![
                GeneInterval::new("chr1", 1, 5, "G").with_strand(Strand::Plus),
                GeneInterval::new("chr1", 3, 9, "G").with_strand(Strand::Minus),
                GeneInterval::new("chr1", 1, 5, "H").with_strand(Strand::Plus),
                GeneInterval::new("chr1", 6, 8, "H").with_strand(Strand::Plus),
            ],
            &mut diags,
        );
        assert_eq!(out[0].strand, None);
        assert_eq!(out[1].strand, Some(Strand::Plus));
    }

    #[test]
    fn test_empty() {
        let mut diags = Vec::new();
        assert!(GeneMerger::new().apply(Vec::new(), &mut diags).is_empty());
    }
}
