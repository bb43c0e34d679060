//! Gene table parsing and BED output.

use crate::interval::{GeneInterval, RawGeneRecord, Strand};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use thiserror::Error;

/// Errors that can occur while reading input or running the pipeline.
#[derive(Error, Debug)]
pub enum BedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid parameter {parameter} = '{value}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
}

impl BedError {
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BedError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BedError>;

/// Column positions of the gene table fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub chr: usize,
    pub start: usize,
    pub end: usize,
    pub gene: usize,
    pub strand: Option<usize>,
}

impl Default for ColumnMap {
    /// Headerless layout: chr, start, end, gene, [strand].
    fn default() -> Self {
        Self {
            chr: 0,
            start: 1,
            end: 2,
            gene: 3,
            strand: Some(4),
        }
    }
}

impl ColumnMap {
    /// Build a map from header names. Returns `None` if a required column is absent.
    pub fn from_header(fields: &[&str]) -> Option<Self> {
        let find = |names: &[&str]| {
            fields.iter().position(|f| {
                let f = f.trim().trim_start_matches('#');
                names.iter().any(|n| n.eq_ignore_ascii_case(f))
            })
        };

        Some(Self {
            chr: find(&["chr", "chrom", "chromosome", "seq_region_name"])?,
            start: find(&["start", "chromstart"])?,
            end: find(&["end", "chromend"])?,
            gene: find(&["gene", "name", "symbol", "display_name"])?,
            strand: find(&["strand"]),
        })
    }
}

/// A streaming reader for tab-separated gene position tables.
pub struct GeneTableReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
    columns: ColumnMap,
    /// Whether the first data line has been inspected for a header
    header_checked: bool,
}

impl<R: Read> GeneTableReader<R> {
    /// Create a new reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::with_capacity(256),
            columns: ColumnMap::default(),
            header_checked: false,
        }
    }

    /// Read the next record.
    pub fn read_record(&mut self) -> Result<Option<RawGeneRecord>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            // Skip empty lines and comments
            let line = self.buffer.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty()
                || line.starts_with("track")
                || line.starts_with("browser")
            {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();

            if line.starts_with('#') {
                // A commented header names the columns; other comments are skipped
                if !self.header_checked {
                    if let Some(columns) = ColumnMap::from_header(&fields) {
                        self.columns = columns;
                        self.header_checked = true;
                    }
                }
                continue;
            }

            if !self.header_checked {
                self.header_checked = true;
                if let Some(columns) = detect_header(&fields, self.line_number)? {
                    self.columns = columns;
                    continue;
                }
            }

            return self.parse_fields(&fields).map(Some);
        }
    }

    fn parse_fields(&self, fields: &[&str]) -> Result<RawGeneRecord> {
        let cell = |idx: usize| {
            fields
                .get(idx)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
        };

        let start = cell(self.columns.start)
            .map(|s| self.parse_position(s, "start"))
            .transpose()?;
        let end = cell(self.columns.end)
            .map(|s| self.parse_position(s, "end"))
            .transpose()?;

        let strand = match self.columns.strand.and_then(cell) {
            Some(s) => Strand::parse(s)
                .ok_or_else(|| BedError::Parse {
                    line: self.line_number,
                    message: format!("Invalid strand: '{}'", s),
                })?
                .map(Strand::sign),
            None => None,
        };

        Ok(RawGeneRecord {
            chr: cell(self.columns.chr).map(str::to_string),
            start,
            end,
            gene: cell(self.columns.gene).map(str::to_string),
            strand,
        })
    }

    fn parse_position(&self, s: &str, field_name: &str) -> Result<i64> {
        s.parse().map_err(|_| BedError::Parse {
            line: self.line_number,
            message: format!("Invalid {} position: '{}'", field_name, s),
        })
    }

    /// Get an iterator over all records.
    pub fn records(self) -> GeneRecordIter<R> {
        GeneRecordIter { reader: self }
    }
}

/// A line is a header when its start column is not a number.
fn detect_header(fields: &[&str], line: usize) -> Result<Option<ColumnMap>> {
    let default = ColumnMap::default();
    let looks_numeric = fields
        .get(default.start)
        .map(|s| s.trim().parse::<i64>().is_ok())
        .unwrap_or(false);
    if looks_numeric {
        return Ok(None);
    }

    ColumnMap::from_header(fields).map(Some).ok_or_else(|| BedError::Parse {
        line,
        message: format!(
            "Header must name chr, start, end and gene columns, got: {}",
            fields.join(", ")
        ),
    })
}

/// Iterator over gene table records.
pub struct GeneRecordIter<R: Read> {
    reader: GeneTableReader<R>,
}

impl<R: Read> Iterator for GeneRecordIter<R> {
    type Item = Result<RawGeneRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

/// Parse rows from a string (useful for testing).
pub fn parse_gene_table(content: &str) -> Result<Vec<RawGeneRecord>> {
    GeneTableReader::new(content.as_bytes()).records().collect()
}

/// Buffer size for BedWriter.
const DEFAULT_BUFFER_SIZE: usize = 256 * 1024;

/// BED4 output writer.
///
/// Integers are formatted with itoa to avoid per-record allocation.
pub struct BedWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
}

impl<W: Write> BedWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, output),
            itoa_buf: itoa::Buffer::new(),
        }
    }

    /// Write one `chrom start end gene` line.
    #[inline]
    pub fn write_interval(&mut self, interval: &GeneInterval) -> Result<()> {
        self.writer.write_all(interval.chrom.as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(interval.start).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer
            .write_all(self.itoa_buf.format(interval.end).as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.writer.write_all(interval.gene.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn write_all(&mut self, intervals: &[GeneInterval]) -> Result<()> {
        for interval in intervals {
            self.write_interval(interval)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write intervals as BED4 to a writer.
pub fn write_bed<W: Write>(writer: W, intervals: &[GeneInterval]) -> Result<()> {
    let mut out = BedWriter::new(writer);
    out.write_all(intervals)?;
    out.flush()
}

/// Render intervals as a BED4 string.
pub fn to_bed_string(intervals: &[GeneInterval]) -> String {
    let mut s = String::with_capacity(intervals.len() * 32);
    for interval in intervals {
        s.push_str(&interval.to_string());
        s.push('\n');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headerless() {
        let content = "chr1\t100\t200\tGENE1\nchr2\t300\t400\tGENE2\n";
        let rows = parse_gene_table(content).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RawGeneRecord::new("chr1", 100, 200, "GENE1"));
        assert_eq!(rows[1].gene.as_deref(), Some("GENE2"));
    }

    #[test]
    fn test_parse_with_header_reordered() {
        let content = "gene\tchr\tstart\tend\nTP53\t17\t7668401\t7687550\n";
        let rows = parse_gene_table(content).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], RawGeneRecord::new("17", 7668401, 7687550, "TP53"));
    }

    #[test]
    fn test_parse_commented_header() {
        let content = "#chrom\tstart\tend\tname\tstrand\nchr1\t5\t1\tG\t-\n";
        let rows = parse_gene_table(content).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].start, Some(5));
        assert_eq!(rows[0].strand, Some(-1));
    }

    #[test]
    fn test_skip_comments_and_track_lines() {
        let content = "# exported genes\n#chrom\tstart\tend\tname\ntrack name=genes\nbrowser position chr1:1-1000\n\nchr1\t100\t200\tA\n";
        let rows = parse_gene_table(content).unwrap();

        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_missing_cells_become_none() {
        let rows = parse_gene_table("chr1\t100\t200\n").unwrap();
        assert_eq!(rows[0].gene, None);
        assert_eq!(rows[0].end, Some(200));
    }

    #[test]
    fn test_invalid_position() {
        let result = parse_gene_table("chr1\t100\tabc\tG\n");
        assert!(matches!(result, Err(BedError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_incomplete_header_rejected() {
        let result = parse_gene_table("chrom\tfrom\tto\n");
        assert!(matches!(result, Err(BedError::Parse { .. })));
    }

    #[test]
    fn test_invalid_strand() {
        let result = parse_gene_table("chr1\t1\t2\tG\t?\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_crlf_lines() {
        let rows = parse_gene_table("chr1\t1\t2\tG\r\n").unwrap();
        assert_eq!(rows[0].gene.as_deref(), Some("G"));
    }

    #[test]
    fn test_write_bed4() {
        let intervals = vec![
            GeneInterval::new("chr1", 800, 1200, "GENE1"),
            GeneInterval::new("chrX", 0, 50, "GENE2"),
        ];
        let mut out = Vec::new();
        write_bed(&mut out, &intervals).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "chr1\t800\t1200\tGENE1\nchrX\t0\t50\tGENE2\n");
        assert_eq!(to_bed_string(&intervals), text);
    }
}
