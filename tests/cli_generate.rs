//! End-to-end tests for the bedgen binary.
//!
//! Tests cover:
//! 1. Gene tables, record JSON and Ensembl responses
//! 2. Filter and extension flags
//! 3. Reports, preview and batch mode
//! 4. Error handling for invalid parameters and malformed input

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::{NamedTempFile, TempDir};

// =============================================================================
// Helper functions
// =============================================================================

fn create_input_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file.flush().unwrap();
    file
}

fn run_bedgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bedgen"))
        .args(args)
        .output()
        .expect("Failed to run bedgen")
}

fn run_bedgen_with_stdin(args: &[&str], stdin_content: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_bedgen"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn bedgen");

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(stdin_content.as_bytes()).unwrap();
    }

    child.wait_with_output().expect("Failed to wait for bedgen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

// =============================================================================
// Test fixtures
// =============================================================================

/// Reverse-strand row, overlapping row for the same gene, and an alt contig.
fn scenario_table() -> &'static str {
    "chr1\t1000\t900\tGENE1\nchr1\t950\t1100\tGENE1\nchr1_alt\t10\t20\tGENE2\n"
}

/// Ensembl batch lookup response with one miss and one non-standard contig.
fn ensembl_response() -> &'static str {
    r#"{
        "BRCA1": {"seq_region_name": "17", "start": 43044295, "end": 43125483, "strand": -1, "display_name": "BRCA1"},
        "MT-CO1": {"seq_region_name": "MT", "start": 5904, "end": 7445, "strand": 1, "display_name": "MT-CO1"},
        "EGFR": {"seq_region_name": "7", "start": 55019017, "end": 55211628, "strand": 1, "display_name": "EGFR"},
        "NOTAGENE": null
    }"#
}

// =============================================================================
// generate
// =============================================================================

#[test]
fn test_generate_end_to_end_scenario() {
    let input = create_input_file(scenario_table());
    let output = run_bedgen(&["generate", "-i", path_str(input.path()), "-e", "100"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "chr1\t800\t1200\tGENE1\n");
}

#[test]
fn test_generate_keep_alt() {
    let input = create_input_file(scenario_table());
    let output = run_bedgen(&[
        "generate",
        "-i",
        path_str(input.path()),
        "-e",
        "100",
        "--keep-alt",
    ]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "chr1\t800\t1200\tGENE1\nchr1_alt\t0\t120\tGENE2\n"
    );
}

#[test]
fn test_generate_default_extension_and_clamp() {
    let input = create_input_file("chr1\t50\t200\tNEAR_START\n");
    let output = run_bedgen(&["generate", "-i", path_str(input.path())]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "chr1\t0\t1200\tNEAR_START\n");
}

#[test]
fn test_generate_natural_order() {
    let input = create_input_file(
        "chr2\t100\t200\tB\nchr10\t100\t200\tJ\nchr1\t100\t200\tA\nchrX\t100\t200\tX\nchr9\t100\t200\tI\n",
    );
    let output = run_bedgen(&["generate", "-i", path_str(input.path()), "-e", "0"]);

    let chroms: Vec<String> = stdout(&output)
        .lines()
        .map(|l| l.split('\t').next().unwrap().to_string())
        .collect();
    assert_eq!(chroms, vec!["chr1", "chr2", "chr9", "chr10", "chrX"]);
}

#[test]
fn test_generate_table_with_header_and_ensembl_names() {
    let input = create_input_file("gene\tchr\tstart\tend\nTP53\t17\t7661779\t7687538\n");
    let output = run_bedgen(&["generate", "-i", path_str(input.path()), "-e", "0"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "chr17\t7661779\t7687538\tTP53\n");
}

#[test]
fn test_generate_from_stdin() {
    let output = run_bedgen_with_stdin(&["generate", "-i", "-", "-e", "10"], "chr3\t100\t200\tS\n");

    assert!(output.status.success());
    assert_eq!(stdout(&output), "chr3\t90\t210\tS\n");
}

#[test]
fn test_generate_to_file() {
    let input = create_input_file(scenario_table());
    let dir = TempDir::new().unwrap();
    let out_path = dir.path().join("genes.bed");

    let output = run_bedgen(&[
        "generate",
        "-i",
        path_str(input.path()),
        "-o",
        path_str(&out_path),
        "-e",
        "100",
    ]);

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert_eq!(
        std::fs::read_to_string(&out_path).unwrap(),
        "chr1\t800\t1200\tGENE1\n"
    );
}

#[test]
fn test_generate_ensembl_response_standard_only() {
    let input = create_input_file(ensembl_response());
    let output = run_bedgen(&["generate", "-i", path_str(input.path()), "-e", "0"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    // MT is outside the default standard set for lookup results
    assert_eq!(
        stdout(&output),
        "chr7\t55019017\t55211628\tEGFR\nchr17\t43044295\t43125483\tBRCA1\n"
    );
    assert!(stderr(&output).contains("NOTAGENE"));
}

#[test]
fn test_generate_ensembl_with_extra_standard_chrom() {
    let input = create_input_file(ensembl_response());
    let output = run_bedgen(&[
        "generate",
        "-i",
        path_str(input.path()),
        "-e",
        "0",
        "--standard-chrom",
        "chrMT",
        "--genes",
        "mt-co1",
    ]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "chrMT\t5904\t7445\tMT-CO1\n");
}

#[test]
fn test_generate_record_json() {
    let input = create_input_file(
        r#"[{"chr": "chr1", "start": 1000, "end": 900, "gene": "GENE1", "is_standard": true},
            {"chr": "chr1", "start": 950, "end": 1100, "gene": "GENE1", "is_standard": true}]"#,
    );
    let output = run_bedgen(&["generate", "-i", path_str(input.path()), "-e", "100"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "chr1\t800\t1200\tGENE1\n");
}

#[test]
fn test_generate_report() {
    let input = create_input_file(scenario_table());
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("report.json");

    let output = run_bedgen(&[
        "generate",
        "-i",
        path_str(input.path()),
        "-e",
        "100",
        "--report",
        path_str(&report),
    ]);
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["records"][0]["end"], 1200);
    let kinds: Vec<&str> = json["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"contig_excluded"));
    assert!(kinds.contains(&"reversed_coordinates"));
}

#[test]
fn test_generate_degenerate_drop() {
    let input = create_input_file("chr1\t500\t500\tZERO\nchr1\t1\t2\tOK\n");

    let widened = run_bedgen(&["generate", "-i", path_str(input.path()), "-e", "0"]);
    assert_eq!(stdout(&widened), "chr1\t1\t2\tOK\nchr1\t500\t501\tZERO\n");

    let dropped = run_bedgen(&[
        "generate",
        "-i",
        path_str(input.path()),
        "-e",
        "0",
        "--degenerate",
        "drop",
    ]);
    assert_eq!(stdout(&dropped), "chr1\t1\t2\tOK\n");
    assert!(stderr(&dropped).contains("ZERO"));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_negative_extension_fails() {
    let input = create_input_file(scenario_table());
    let output = run_bedgen(&["generate", "-i", path_str(input.path()), "-e", "-5"]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("extend_bp"));
}

#[test]
fn test_missing_gene_column_fails() {
    let input = create_input_file("chr1\t100\t200\n");
    let output = run_bedgen(&["generate", "-i", path_str(input.path())]);

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("gene"));
}

#[test]
fn test_malformed_position_fails() {
    let input = create_input_file("chr1\t100\tabc\tG\n");
    let output = run_bedgen(&["generate", "-i", path_str(input.path())]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("line 1"));
}

#[test]
fn test_missing_input_file_fails() {
    let output = run_bedgen(&["generate", "-i", "/nonexistent/genes.tsv"]);
    assert!(!output.status.success());
}

// =============================================================================
// preview / batch
// =============================================================================

#[test]
fn test_preview_table() {
    let input = create_input_file(
        "chr1\t50\t200\tA\nchr2\t5000\t6000\tB\nchr3\t5000\t6000\tC\nchr4\t5000\t6000\tD\n",
    );
    let output = run_bedgen(&[
        "preview",
        "-i",
        path_str(input.path()),
        "-e",
        "100",
        "-n",
        "4",
    ]);

    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("gene"));
    assert!(lines[1].contains("0 (-50)"));
}

#[test]
fn test_batch_writes_one_file_per_input() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("panel_a.tsv");
    let b = dir.path().join("panel_b.tsv");
    std::fs::write(&a, scenario_table()).unwrap();
    std::fs::write(&b, "chr2\t10\t20\tX\n").unwrap();
    let out_dir = dir.path().join("out");

    let output = run_bedgen(&[
        "batch",
        "-i",
        path_str(&a),
        path_str(&b),
        "-o",
        path_str(&out_dir),
        "-e",
        "100",
        "--threads",
        "2",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        std::fs::read_to_string(out_dir.join("panel_a.bed")).unwrap(),
        "chr1\t800\t1200\tGENE1\n"
    );
    assert_eq!(
        std::fs::read_to_string(out_dir.join("panel_b.bed")).unwrap(),
        "chr2\t0\t120\tX\n"
    );
}

#[test]
fn test_batch_reports_failures() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.tsv");
    let bad = dir.path().join("bad.tsv");
    std::fs::write(&good, "chr2\t10\t20\tX\n").unwrap();
    std::fs::write(&bad, "chr2\t10\n").unwrap();
    let out_dir = dir.path().join("out");

    let output = run_bedgen(&[
        "batch",
        "-i",
        path_str(&good),
        path_str(&bad),
        "-o",
        path_str(&out_dir),
    ]);

    assert!(!output.status.success());
    assert!(out_dir.join("good.bed").exists());
    assert!(stderr(&output).contains("1 input file(s) failed"));
}
