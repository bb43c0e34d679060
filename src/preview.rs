//! Before/after preview of the region extension for a sample of genes.

use crate::interval::GeneInterval;
use rand::rngs::SmallRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;

/// Bounds of the random sample size when no explicit count is given.
const MIN_SAMPLE: usize = 3;
const MAX_SAMPLE: usize = 5;

/// One gene's coordinates before and after extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
    pub gene: String,
    pub chrom: String,
    pub start: u64,
    pub new_start: u64,
    pub end: u64,
    pub new_end: u64,
}

impl PreviewRow {
    /// Bases removed from the start (smaller than the margin when clamped at 0).
    pub fn start_delta(&self) -> u64 {
        self.start - self.new_start
    }

    pub fn end_delta(&self) -> u64 {
        self.new_end - self.end
    }
}

/// A sample of preview rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtensionPreview {
    pub rows: Vec<PreviewRow>,
}

impl ExtensionPreview {
    /// Pair up unextended and extended records and sample some of them.
    ///
    /// Both slices come from the same pipeline call and are index-aligned.
    /// `count` fixes the sample size; otherwise it is drawn from 3..=5.
    /// Rows keep the order of the input.
    pub fn sample(
        unextended: &[GeneInterval],
        extended: &[GeneInterval],
        count: Option<usize>,
        seed: u64,
    ) -> Self {
        let total = unextended.len().min(extended.len());
        let mut rng = SmallRng::seed_from_u64(seed);
        let wanted = count.unwrap_or_else(|| rng.gen_range(MIN_SAMPLE..=MAX_SAMPLE));
        let amount = wanted.min(total);

        let mut picked = sample(&mut rng, total, amount).into_vec();
        picked.sort_unstable();

        let rows = picked
            .into_iter()
            .map(|i| {
                let before = &unextended[i];
                let after = &extended[i];
                PreviewRow {
                    gene: before.gene.clone(),
                    chrom: before.chrom.clone(),
                    start: before.start,
                    new_start: after.start,
                    end: before.end,
                    new_end: after.end,
                }
            })
            .collect();

        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for ExtensionPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = ["gene", "chrom", "start", "new_start", "end", "new_end"];
        let cells: Vec<[String; 6]> = self
            .rows
            .iter()
            .map(|r| {
                [
                    r.gene.clone(),
                    r.chrom.clone(),
                    r.start.to_string(),
                    format!("{} (-{})", r.new_start, r.start_delta()),
                    r.end.to_string(),
                    format!("{} (+{})", r.new_end, r.end_delta()),
                ]
            })
            .collect();

        let mut widths = header.map(str::len);
        for row in &cells {
            for (w, c) in widths.iter_mut().zip(row) {
                *w = (*w).max(c.len());
            }
        }

        write_row(f, &header, &widths)?;
        for row in &cells {
            let refs: Vec<&str> = row.iter().map(String::as_str).collect();
            write_row(f, &refs, &widths)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, values: &[&str], widths: &[usize]) -> fmt::Result {
    let padded: Vec<String> = values
        .iter()
        .zip(widths)
        .map(|(v, w)| format!("{:<w$}", v, w = *w))
        .collect();
    writeln!(f, "{}", padded.join("  ").trim_end())
}
