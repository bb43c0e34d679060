//! Loading gene records from files or stdin in any supported format.

use crate::bed::{parse_gene_table, BedError, Result};
use crate::config::ProcessOptions;
use crate::lookup::{parse_ensembl_response, parse_record_json, LookupResult};
use rustc_hash::FxHashSet;
use std::fmt;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Tab-separated gene position table
    Tsv,
    /// JSON array of gene records
    Json,
    /// Saved Ensembl symbol lookup response
    Ensembl,
}

impl InputFormat {
    /// Guess the format from the content: a JSON array, a JSON object, or a table.
    pub fn detect(content: &str) -> Self {
        match content.trim_start().as_bytes().first() {
            Some(b'[') => InputFormat::Json,
            Some(b'{') => InputFormat::Ensembl,
            _ => InputFormat::Tsv,
        }
    }

    /// Caller defaults: tables keep every contig, lookup results only
    /// standard chromosomes.
    pub fn default_options(self) -> ProcessOptions {
        match self {
            InputFormat::Tsv => ProcessOptions::for_table(),
            InputFormat::Json | InputFormat::Ensembl => ProcessOptions::for_lookup(),
        }
    }
}

impl FromStr for InputFormat {
    type Err = BedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tsv" | "tab" | "table" => Ok(InputFormat::Tsv),
            "json" => Ok(InputFormat::Json),
            "ensembl" => Ok(InputFormat::Ensembl),
            _ => Err(BedError::InvalidFormat(format!(
                "Unknown input format '{}'. Use: tsv, json, ensembl",
                s
            ))),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Tsv => write!(f, "tsv"),
            InputFormat::Json => write!(f, "json"),
            InputFormat::Ensembl => write!(f, "ensembl"),
        }
    }
}

/// Records loaded from one source, with the format actually used.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub format: InputFormat,
    pub lookup: LookupResult,
}

/// Read a whole source. `-` means stdin.
pub fn read_source(path: &Path) -> Result<String> {
    let mut content = String::new();
    if path.as_os_str() == "-" {
        io::stdin().lock().read_to_string(&mut content)?;
    } else {
        std::fs::File::open(path)?.read_to_string(&mut content)?;
    }
    Ok(content)
}

/// Parse records from already-read content.
///
/// With `requested` symbols, records whose gene is not requested are dropped
/// and requested symbols with no record are reported as not found.
pub fn parse_input(
    content: &str,
    format: Option<InputFormat>,
    requested: &[String],
) -> Result<LoadedInput> {
    let format = format.unwrap_or_else(|| InputFormat::detect(content));

    let lookup = match format {
        InputFormat::Ensembl => parse_ensembl_response(content, requested)?,
        InputFormat::Tsv | InputFormat::Json => {
            let records = match format {
                InputFormat::Tsv => parse_gene_table(content)?,
                _ => parse_record_json(content)?,
            };
            let lookup = LookupResult {
                records,
                not_found: Vec::new(),
            };
            restrict_to_symbols(lookup, requested)
        }
    };

    Ok(LoadedInput { format, lookup })
}

/// Load and parse one source.
pub fn load_input(
    path: &Path,
    format: Option<InputFormat>,
    requested: &[String],
) -> Result<LoadedInput> {
    let content = read_source(path)?;
    parse_input(&content, format, requested)
}

fn restrict_to_symbols(mut lookup: LookupResult, requested: &[String]) -> LookupResult {
    if requested.is_empty() {
        return lookup;
    }

    let wanted: FxHashSet<String> = requested.iter().map(|s| s.to_ascii_uppercase()).collect();
    let mut seen: FxHashSet<String> = FxHashSet::default();

    lookup.records.retain(|rec| {
        let Some(gene) = rec.gene.as_deref() else {
            // Keep it so validation reports the missing field
            return true;
        };
        let key = gene.trim().to_ascii_uppercase();
        let keep = wanted.contains(&key);
        if keep {
            seen.insert(key);
        }
        keep
    });

    lookup.not_found.extend(
        requested
            .iter()
            .filter(|s| !seen.contains(&s.to_ascii_uppercase()))
            .cloned(),
    );
    lookup
}
