//! Gene records produced by annotation lookups.
//!
//! Two JSON shapes are accepted:
//! - a flat array of `{chr, start, end, gene, strand}` objects
//! - a saved Ensembl `POST lookup/symbol/:species` response, mapping each
//!   symbol to its lookup result or `null`

use crate::bed::Result;
use crate::interval::RawGeneRecord;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Records recovered from a lookup, plus the symbols that had no hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupResult {
    pub records: Vec<RawGeneRecord>,
    pub not_found: Vec<String>,
}

/// One entry of an Ensembl symbol lookup response.
#[derive(Debug, Clone, Deserialize)]
struct EnsemblGene {
    #[serde(default)]
    seq_region_name: Option<String>,
    #[serde(default)]
    start: Option<i64>,
    #[serde(default)]
    end: Option<i64>,
    #[serde(default)]
    strand: Option<i8>,
    #[serde(default)]
    display_name: Option<String>,
}

impl EnsemblGene {
    fn into_record(self, symbol: &str) -> RawGeneRecord {
        RawGeneRecord {
            chr: self.seq_region_name,
            start: self.start,
            end: self.end,
            gene: Some(self.display_name.unwrap_or_else(|| symbol.to_string())),
            strand: self.strand,
        }
    }
}

/// Parse a flat JSON array of gene records from a string.
pub fn parse_record_json(content: &str) -> Result<Vec<RawGeneRecord>> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a saved Ensembl symbol lookup response.
///
/// With `requested` symbols, only those are returned and any requested symbol
/// without a hit is reported as not found. Without, every non-null entry is
/// returned and null entries are reported.
pub fn parse_ensembl_response(content: &str, requested: &[String]) -> Result<LookupResult> {
    let response: BTreeMap<String, Option<EnsemblGene>> = serde_json::from_str(content)?;
    Ok(collect_response(response, requested))
}

fn collect_response(
    mut response: BTreeMap<String, Option<EnsemblGene>>,
    requested: &[String],
) -> LookupResult {
    let mut result = LookupResult::default();

    if requested.is_empty() {
        for (symbol, gene) in response {
            match gene {
                Some(gene) => result.records.push(gene.into_record(&symbol)),
                None => result.not_found.push(symbol),
            }
        }
        return result;
    }

    // Response keys echo the request but case may differ
    let keys: BTreeMap<String, String> = response
        .keys()
        .map(|k| (k.to_ascii_uppercase(), k.clone()))
        .collect();

    for symbol in requested {
        let hit = keys
            .get(&symbol.to_ascii_uppercase())
            .and_then(|key| response.remove(key))
            .flatten();
        match hit {
            Some(gene) => result.records.push(gene.into_record(symbol)),
            None => result.not_found.push(symbol.clone()),
        }
    }

    result
}

/// Split a comma- or newline-separated symbol list.
/// Symbols are trimmed, upper-cased and deduplicated in first-seen order.
pub fn parse_symbols(text: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    text.split([',', '\n', '\r'])
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
