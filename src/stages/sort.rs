//! Natural sorter.
//!
//! Sort order:
//! 1. Primary: chromosome, numeric-aware (chr1 < chr2 < chr10 < chrX < chrY < chrMT),
//!    unrecognised labels last, grouped per label in first-appearance order
//! 2. Secondary: start coordinate (ascending)
//! 3. Ties: input order preserved (stable sort)
//!
//! Chromosome keys are pre-computed once per distinct label so that the
//! comparator never re-parses strings.

use crate::chrom::{classify, ChromClass, ChromSortKey};
use crate::interval::GeneInterval;
use crate::parallel::PARALLEL_THRESHOLD;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalSorter;

impl NaturalSorter {
    pub fn new() -> Self {
        Self
    }

    /// Sort intervals by natural chromosome order, then start.
    pub fn sort(&self, intervals: Vec<GeneInterval>) -> Vec<GeneInterval> {
        self.sort_by_interval(intervals, |iv| iv)
    }

    /// Sort arbitrary items by the interval each one carries.
    ///
    /// Used to reorder extended records together with their unextended
    /// counterparts so both lists stay index-aligned.
    pub fn sort_by_interval<T, F>(&self, items: Vec<T>, interval: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&T) -> &GeneInterval + Sync,
    {
        if items.len() < 2 {
            return items;
        }

        // Assign one key per distinct chromosome, ranking unrecognised
        // labels by first appearance.
        let mut keys: FxHashMap<&str, u32> = FxHashMap::default();
        let mut distinct: Vec<ChromSortKey> = Vec::new();
        let mut other_rank = 0;
        for item in &items {
            let chrom = interval(item).chrom.as_str();
            if !keys.contains_key(chrom) {
                let rank = if classify(chrom) == ChromClass::Other {
                    other_rank += 1;
                    other_rank
                } else {
                    0
                };
                keys.insert(chrom, distinct.len() as u32);
                distinct.push(ChromSortKey::new(chrom, rank));
            }
        }

        // Collapse keys to dense ordinals so comparisons are integer-only.
        let mut by_key: Vec<u32> = (0..distinct.len() as u32).collect();
        by_key.sort_by(|&a, &b| distinct[a as usize].cmp(&distinct[b as usize]));
        let mut ordinal = vec![0u32; distinct.len()];
        for (pos, &k) in by_key.iter().enumerate() {
            // Equal keys (chrM / chrMT) share an ordinal
            ordinal[k as usize] = if pos > 0
                && distinct[by_key[pos - 1] as usize].cmp(&distinct[k as usize]) == Ordering::Equal
            {
                ordinal[by_key[pos - 1] as usize]
            } else {
                pos as u32
            };
        }

        let sort_keys: Vec<(u32, u64)> = items
            .iter()
            .map(|item| {
                let iv = interval(item);
                (ordinal[keys[iv.chrom.as_str()] as usize], iv.start)
            })
            .collect();

        let mut keyed: Vec<((u32, u64), T)> = sort_keys.into_iter().zip(items).collect();
        let compare = |a: &((u32, u64), T), b: &((u32, u64), T)| a.0.cmp(&b.0);

        // Both sorts are stable
        if keyed.len() >= PARALLEL_THRESHOLD {
            keyed.par_sort_by(compare);
        } else {
            keyed.sort_by(compare);
        }

        keyed.into_iter().map(|(_, item)| item).collect()
    }
}
