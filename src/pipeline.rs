//! The interval pipeline: filter, normalize, merge, extend, sort.
//!
//! A pipeline call is a pure function of its inputs. Options are validated
//! before any stage runs, so an invalid call never yields partial output.

use crate::bed::{BedError, Result};
use crate::chrom::canonical_chrom;
use crate::config::{PipelineConfig, ProcessOptions};
use crate::diagnostics::Diagnostic;
use crate::interval::{validate_records, GeneInterval, RawGeneRecord};
use crate::stages::{ContigFilter, GeneMerger, NaturalSorter, PositionNormalizer, RegionExtender};
use log::debug;

/// Result of a successful pipeline call.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    /// Final records: merged, extended and sorted
    pub intervals: Vec<GeneInterval>,
    /// The same records before extension, in the same order
    pub unextended: Vec<GeneInterval>,
    /// Non-fatal conditions, in the order they were found
    pub diagnostics: Vec<Diagnostic>,
}

impl ProcessOutput {
    /// Diagnostics that dropped, relocated or widened data.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

/// Bundles the configuration with the stage implementations.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run all stages over validated intervals.
    pub fn process(
        &self,
        mut intervals: Vec<GeneInterval>,
        options: &ProcessOptions,
    ) -> Result<ProcessOutput> {
        let extender = RegionExtender::from_options(options)?;
        canonicalize_intervals(&mut intervals)?;

        let mut diagnostics = Vec::new();
        let input_len = intervals.len();

        let filtered =
            ContigFilter::from_options(options).apply(intervals, &self.config, &mut diagnostics);
        debug!("contig filter kept {} of {} records", filtered.len(), input_len);

        let normalized = PositionNormalizer::new(self.config.degenerate_policy)
            .apply(filtered, &mut diagnostics);

        let merged = GeneMerger::new().apply(normalized, &mut diagnostics);
        debug!("merged into {} genes", merged.len());

        // Extend first, then sort on the extended coordinates. Starts clamped
        // to 0 tie and keep their merged order.
        let extended = extender.apply(merged.clone());
        let pairs: Vec<(GeneInterval, GeneInterval)> = extended.into_iter().zip(merged).collect();
        let (intervals, unextended): (Vec<_>, Vec<_>) = NaturalSorter::new()
            .sort_by_interval(pairs, |(after, _)| after)
            .into_iter()
            .unzip();

        debug!(
            "pipeline produced {} records with {} diagnostics",
            intervals.len(),
            diagnostics.len()
        );

        Ok(ProcessOutput {
            intervals,
            unextended,
            diagnostics,
        })
    }

    /// Validate raw rows, then run all stages.
    pub fn process_raw(
        &self,
        records: Vec<RawGeneRecord>,
        options: &ProcessOptions,
    ) -> Result<ProcessOutput> {
        options.validated_extend()?;
        let intervals = validate_records(records)?;
        self.process(intervals, options)
    }
}

/// Reject records with an empty gene or chromosome and rewrite every
/// chromosome label to its canonical `chr` form.
///
/// Records built from [`RawGeneRecord`] are already canonical; hand-built
/// [`GeneInterval`]s may not be.
fn canonicalize_intervals(intervals: &mut [GeneInterval]) -> Result<()> {
    for (i, iv) in intervals.iter_mut().enumerate() {
        if iv.gene.trim().is_empty() {
            return Err(BedError::invalid_parameter(
                "gene",
                iv.gene.clone(),
                format!("record {} has an empty gene identifier", i),
            ));
        }
        match canonical_chrom(&iv.chrom) {
            Some(chrom) => iv.chrom = chrom,
            None => {
                return Err(BedError::invalid_parameter(
                    "chr",
                    iv.chrom.clone(),
                    format!("record {} ({}) has an empty chromosome", i, iv.gene),
                ))
            }
        }
    }
    Ok(())
}

/// Run the pipeline with an explicit configuration.
pub fn process(
    intervals: Vec<GeneInterval>,
    options: &ProcessOptions,
    config: &PipelineConfig,
) -> Result<ProcessOutput> {
    Pipeline::new(config.clone()).process(intervals, options)
}
