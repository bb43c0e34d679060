//! Core gene interval types.

use crate::bed::{BedError, Result};
use crate::chrom::canonical_chrom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A gene's genomic interval.
/// Uses 0-based, half-open coordinates (BED format) once normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GeneInterval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub gene: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strand: Option<Strand>,
}

impl GeneInterval {
    /// Create a new interval without strand information.
    #[inline]
    pub fn new(chrom: impl Into<String>, start: u64, end: u64, gene: impl Into<String>) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            gene: gene.into(),
            strand: None,
        }
    }

    /// Attach a strand.
    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = Some(strand);
        self
    }

    /// Returns the length of the interval.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the interval has zero length.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns true if start and end are given in reverse order.
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for GeneInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t{}", self.chrom, self.start, self.end, self.gene)
    }
}

/// An unvalidated gene position row as supplied by a record source.
///
/// Every field is optional so that missing values can be reported with the
/// index of the offending record instead of failing inside a parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawGeneRecord {
    #[serde(default, alias = "chrom", alias = "chromosome", alias = "seq_region_name")]
    pub chr: Option<String>,
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub end: Option<i64>,
    #[serde(default, alias = "name", alias = "symbol", alias = "display_name")]
    pub gene: Option<String>,
    #[serde(default)]
    pub strand: Option<i8>,
}

impl RawGeneRecord {
    pub fn new(chr: &str, start: i64, end: i64, gene: &str) -> Self {
        Self {
            chr: Some(chr.to_string()),
            start: Some(start),
            end: Some(end),
            gene: Some(gene.to_string()),
            strand: None,
        }
    }

    /// Validate this row into a [`GeneInterval`].
    ///
    /// `index` is the 0-based position of the record in its source and is
    /// only used for error messages. The chromosome is canonicalized here.
    pub fn into_interval(self, index: usize) -> Result<GeneInterval> {
        let chr = required(self.chr, "chr", index)?;
        let gene = required(self.gene, "gene", index)?;
        let start = required(self.start, "start", index)?;
        let end = required(self.end, "end", index)?;

        let gene = gene.trim().to_string();
        if gene.is_empty() {
            return Err(BedError::invalid_parameter(
                "gene",
                "",
                format!("record {} has an empty gene identifier", index),
            ));
        }

        let chrom = canonical_chrom(&chr).ok_or_else(|| {
            BedError::invalid_parameter(
                "chr",
                chr.clone(),
                format!("record {} ({}) has an empty chromosome", index, gene),
            )
        })?;

        let start = coordinate(start, "start", index)?;
        let end = coordinate(end, "end", index)?;

        let strand = match self.strand {
            None | Some(0) => None,
            Some(s) => Some(Strand::from_sign(s).ok_or_else(|| {
                BedError::invalid_parameter(
                    "strand",
                    s.to_string(),
                    format!("record {} ({}) strand must be 1 or -1", index, gene),
                )
            })?),
        };

        Ok(GeneInterval {
            chrom,
            start,
            end,
            gene,
            strand,
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str, index: usize) -> Result<T> {
    value.ok_or_else(|| {
        BedError::invalid_parameter(
            field,
            "",
            format!("record {} is missing required field '{}'", index, field),
        )
    })
}

fn coordinate(value: i64, field: &'static str, index: usize) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        BedError::invalid_parameter(
            field,
            value.to_string(),
            format!("record {} has a negative {} coordinate", index, field),
        )
    })
}

/// Validate a batch of raw records, failing on the first invalid one.
pub fn validate_records(records: Vec<RawGeneRecord>) -> Result<Vec<GeneInterval>> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| rec.into_interval(i))
        .collect()
}

/// Strand orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    /// Parse Ensembl-style `1` / `-1`.
    pub fn from_sign(s: i8) -> Option<Self> {
        match s {
            1 => Some(Strand::Plus),
            -1 => Some(Strand::Minus),
            _ => None,
        }
    }

    /// Parse a table cell: `+`, `-`, `1`, `+1` or `-1`. `.` means unknown.
    pub fn parse(s: &str) -> Option<Option<Self>> {
        match s.trim() {
            "" | "." => Some(None),
            "+" | "1" | "+1" => Some(Some(Strand::Plus)),
            "-" | "-1" => Some(Some(Strand::Minus)),
            _ => None,
        }
    }

    pub fn sign(self) -> i8 {
        match self {
            Strand::Plus => 1,
            Strand::Minus => -1,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}
