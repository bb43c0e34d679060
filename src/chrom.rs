//! Chromosome label handling: canonical `chr` naming and natural ordering.
//!
//! Natural order (chr1 < chr2 < ... < chr22 < chrX < chrY < chrMT):
//! 1. Labels whose body starts with digits, by that number then by suffix
//! 2. Named chromosomes X, Y, M/MT in that fixed order
//! 3. Anything else, grouped per label (callers decide the order among them)

use std::cmp::Ordering;

/// Named (text-only) chromosomes, in sort order.
const NAMED: [&str; 4] = ["X", "Y", "M", "MT"];

/// Canonical form of a chromosome label, or `None` for an empty label.
///
/// `17` -> `chr17`, `Chr17` -> `chr17`, `chrx` -> `chrX`, `M` -> `chrMT`.
/// Unrecognised contigs keep their body; a `chr` prefix in any case is
/// lowercased (`Chr1_alt` -> `chr1_alt`) and added when missing.
pub fn canonical_chrom(label: &str) -> Option<String> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    let body = match label.get(..3) {
        Some(p) if p.eq_ignore_ascii_case("chr") => &label[3..],
        _ => label,
    };

    match recognised_body(body) {
        Some(primary) => Some(format!("chr{}", primary)),
        None => Some(format!("chr{}", body)),
    }
}

/// Canonical spelling of a primary chromosome body, if it is one.
fn recognised_body(body: &str) -> Option<String> {
    if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) {
        // Leading zeros are not canonical: chr01 -> chr1.
        let trimmed = body.trim_start_matches('0');
        return Some(if trimmed.is_empty() { "0" } else { trimmed }.to_string());
    }
    match body.to_ascii_uppercase().as_str() {
        "X" => Some("X".to_string()),
        "Y" => Some("Y".to_string()),
        "M" | "MT" => Some("MT".to_string()),
        _ => None,
    }
}

/// Sort class of a chromosome label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromClass {
    /// Body starts with a number (chr1, chr10, chr1_KI270706v1_random)
    Numeric { number: u64, suffix: String },
    /// X, Y, M or MT, as an index into the fixed named order
    Named(usize),
    /// No recognisable numeric or named body
    Other,
}

/// Pre-computed chromosome sort key so that comparisons never re-parse labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromSortKey {
    class: ChromClass,
    /// Tie-breaker among `Other` labels, assigned by the caller
    rank: usize,
}

impl ChromSortKey {
    /// Build a key. `other_rank` is only used when the label is unrecognised.
    pub fn new(chrom: &str, other_rank: usize) -> Self {
        let class = classify(chrom);
        let rank = if class == ChromClass::Other { other_rank } else { 0 };
        Self { class, rank }
    }
}

/// Classify a label by stripping its non-numeric prefix.
pub fn classify(chrom: &str) -> ChromClass {
    let bytes = chrom.as_bytes();
    let len = bytes.len();

    // Find where digits start
    let mut digit_start = 0;
    while digit_start < len && !bytes[digit_start].is_ascii_digit() {
        digit_start += 1;
    }

    if digit_start >= len {
        // No digits found (e.g., "chrX", "chrMT")
        let body = chrom
            .get(..3)
            .filter(|p| p.eq_ignore_ascii_case("chr"))
            .map_or(chrom, |_| &chrom[3..]);
        return match NAMED.iter().position(|n| n.eq_ignore_ascii_case(body)) {
            // M and MT are the same chromosome
            Some(i) => ChromClass::Named(i.min(2)),
            None => ChromClass::Other,
        };
    }

    let prefix = &chrom[..digit_start];
    if !prefix.is_empty() && !prefix.eq_ignore_ascii_case("chr") {
        return ChromClass::Other;
    }

    // Find where digits end
    let mut digit_end = digit_start;
    while digit_end < len && bytes[digit_end].is_ascii_digit() {
        digit_end += 1;
    }

    match chrom[digit_start..digit_end].parse() {
        Ok(number) => ChromClass::Numeric {
            number,
            suffix: chrom[digit_end..].to_string(),
        },
        Err(_) => ChromClass::Other,
    }
}

impl Ord for ChromSortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        use ChromClass::*;
        match (&self.class, &other.class) {
            (
                Numeric {
                    number: a,
                    suffix: sa,
                },
                Numeric {
                    number: b,
                    suffix: sb,
                },
            ) => a.cmp(b).then_with(|| compare_suffix(sa, sb)),
            (Numeric { .. }, _) => Ordering::Less,
            (_, Numeric { .. }) => Ordering::Greater,
            (Named(a), Named(b)) => a.cmp(b),
            (Named(_), Other) => Ordering::Less,
            (Other, Named(_)) => Ordering::Greater,
            (Other, Other) => self.rank.cmp(&other.rank),
        }
    }
}

impl PartialOrd for ChromSortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Primary chromosomes (empty suffix) sort before their own scaffolds.
fn compare_suffix(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => natural_compare(a, b),
    }
}

/// Natural comparison for arbitrary strings.
/// Handles embedded numbers properly (v2 < v10).
pub fn natural_compare(a: &str, b: &str) -> Ordering {
    let a_parts = split_numeric(a);
    let b_parts = split_numeric(b);

    for (ap, bp) in a_parts.iter().zip(b_parts.iter()) {
        let cmp = match (ap, bp) {
            (Part::Text(at), Part::Text(bt)) => at.cmp(bt),
            (Part::Number(an), Part::Number(bn)) => an.cmp(bn),
            (Part::Text(_), Part::Number(_)) => Ordering::Greater,
            (Part::Number(_), Part::Text(_)) => Ordering::Less,
        };
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    a_parts.len().cmp(&b_parts.len())
}

#[derive(Debug, PartialEq, Eq)]
enum Part<'a> {
    Text(&'a str),
    Number(u64),
}

fn split_numeric(s: &str) -> Vec<Part<'_>> {
    let mut parts = Vec::new();
    let bytes = s.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let begin = i;
        let digits = bytes[i].is_ascii_digit();
        while i < bytes.len() && bytes[i].is_ascii_digit() == digits {
            i += 1;
        }
        let run = &s[begin..i];
        match run.parse() {
            Ok(n) if digits => parts.push(Part::Number(n)),
            _ => parts.push(Part::Text(run)),
        }
    }

    parts
}

/// The default standard set: chr1..chr22, chrX, chrY.
pub fn default_standard_chromosomes() -> Vec<String> {
    (1..=22)
        .map(|i| format!("chr{}", i))
        .chain(["chrX".to_string(), "chrY".to_string()])
        .collect()
}
