//! Grouping and parallel processing utilities using Rayon.

use crate::interval::GeneInterval;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Minimum number of items before enabling parallelization.
/// Below this threshold, sequential processing is faster due to
/// thread spawn overhead.
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Group intervals by gene identifier (case-sensitive).
/// Groups are returned in order of first appearance.
pub fn group_by_gene(intervals: Vec<GeneInterval>) -> Vec<Vec<GeneInterval>> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<GeneInterval>> = Vec::new();

    for interval in intervals {
        match index.get(&interval.gene) {
            Some(&i) => groups[i].push(interval),
            None => {
                index.insert(interval.gene.clone(), groups.len());
                groups.push(vec![interval]);
            }
        }
    }

    groups
}

/// Map every item, in parallel once the input is large enough.
/// Output order matches input order.
pub fn map_maybe_parallel<T, U, F>(items: Vec<T>, f: F) -> Vec<U>
where
    T: Send,
    U: Send,
    F: Fn(T) -> U + Sync + Send,
{
    if items.len() < PARALLEL_THRESHOLD {
        items.into_iter().map(f).collect()
    } else {
        items.into_par_iter().map(f).collect()
    }
}

/// Run independent jobs on the global rayon pool, preserving order.
pub fn run_jobs<T, U, F>(jobs: Vec<T>, f: F) -> Vec<U>
where
    T: Send,
    U: Send,
    F: Fn(T) -> U + Sync + Send,
{
    jobs.into_par_iter().map(f).collect()
}
