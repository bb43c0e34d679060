//! bedgen: gene positions to BED intervals
//!
//! This library turns gene coordinate records into BED4 intervals through a
//! fixed pipeline:
//!
//! 1. **Contig filter**: drop alt/fix contigs and, optionally, non-standard chromosomes
//! 2. **Position normalizer**: swap reversed coordinates, handle zero-length intervals
//! 3. **Gene merger**: collapse all entries of a gene into one span
//! 4. **Region extender**: pad both sides, clamping the start at 0
//! 5. **Natural sorter**: chr1 < chr2 < ... < chr10 < chrX, then by start
//!
//! Every call is a pure function of its inputs and safe to run concurrently.
//!
//! # Example
//!
//! ```rust
//! use bedgen::{GeneInterval, Pipeline, ProcessOptions};
//!
//! let input = vec![
//!     GeneInterval::new("chr1", 1000, 900, "GENE1"),
//!     GeneInterval::new("chr1", 950, 1100, "GENE1"),
//!     GeneInterval::new("chr1_alt", 10, 20, "GENE2"),
//! ];
//!
//! let options = ProcessOptions::default().with_extend(100);
//! let output = Pipeline::default().process(input, &options).unwrap();
//!
//! assert_eq!(bedgen::bed::to_bed_string(&output.intervals), "chr1\t800\t1200\tGENE1\n");
//! ```

pub mod bed;
pub mod chrom;
pub mod config;
pub mod diagnostics;
pub mod input;
pub mod interval;
pub mod lookup;
pub mod parallel;
pub mod pipeline;
pub mod preview;
pub mod report;
pub mod stages;

// Re-export commonly used types
pub use bed::{write_bed, BedError, BedWriter};
pub use config::{DegeneratePolicy, PipelineConfig, ProcessOptions};
pub use diagnostics::Diagnostic;
pub use interval::{GeneInterval, RawGeneRecord, Strand};
pub use pipeline::{process, Pipeline, ProcessOutput};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bed::{write_bed, BedError, BedWriter};
    pub use crate::config::{DegeneratePolicy, PipelineConfig, ProcessOptions};
    pub use crate::diagnostics::Diagnostic;
    pub use crate::input::{load_input, InputFormat};
    pub use crate::interval::{GeneInterval, RawGeneRecord, Strand};
    pub use crate::pipeline::{process, Pipeline, ProcessOutput};
    pub use crate::preview::ExtensionPreview;
}
