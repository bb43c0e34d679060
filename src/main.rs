//! bedgen: build BED files from gene positions
//!
//! Usage: bedgen <COMMAND> [OPTIONS]

use clap::{Args, Parser, Subcommand};
use log::{error, info, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use bedgen::bed::{BedError, BedWriter};
use bedgen::chrom::canonical_chrom;
use bedgen::config::{DegeneratePolicy, PipelineConfig, ProcessOptions, DEFAULT_EXTEND_BP};
use bedgen::input::{load_input, InputFormat, LoadedInput};
use bedgen::lookup::{parse_symbols, LookupResult};
use bedgen::parallel::run_jobs;
use bedgen::pipeline::{Pipeline, ProcessOutput};
use bedgen::preview::ExtensionPreview;
use bedgen::report::Report;

#[derive(Parser)]
#[command(name = "bedgen")]
#[command(version)]
#[command(about = "Build merged, padded and naturally sorted BED files from gene positions", long_about = None)]
struct Cli {
    /// Number of threads to use for batch processing (default: number of CPUs)
    #[arg(long, short = 't', global = true)]
    threads: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand that runs the pipeline.
#[derive(Args, Clone)]
struct PipelineArgs {
    /// Input format (default: detected from content)
    #[arg(short = 'f', long)]
    format: Option<InputFormat>,

    /// Bases to add on each side of every gene
    #[arg(short = 'e', long = "extend", default_value_t = DEFAULT_EXTEND_BP, allow_negative_numbers = true)]
    extend_bp: i64,

    /// Keep contigs whose name contains "alt"
    #[arg(long)]
    keep_alt: bool,

    /// Keep contigs whose name contains "fix"
    #[arg(long)]
    keep_fix: bool,

    /// Drop chromosomes outside chr1-22, chrX, chrY (default for JSON input)
    #[arg(long, conflicts_with = "include_non_standard")]
    standard_only: bool,

    /// Keep chromosomes outside the standard set (default for table input)
    #[arg(long)]
    include_non_standard: bool,

    /// Add a chromosome to the standard set (repeatable, e.g. chrMT)
    #[arg(long = "standard-chrom", value_name = "CHROM")]
    standard_chroms: Vec<String>,

    /// Zero-length interval handling: widen | drop
    #[arg(long, default_value = "widen")]
    degenerate: DegeneratePolicy,

    /// Only keep these gene symbols (comma separated)
    #[arg(long)]
    genes: Option<String>,
}

impl PipelineArgs {
    fn config(&self) -> PipelineConfig {
        PipelineConfig::new()
            .with_extra_standard(
                self.standard_chroms
                    .iter()
                    .map(|c| canonical_chrom(c).unwrap_or_else(|| c.clone())),
            )
            .with_degenerate_policy(self.degenerate)
    }

    fn options(&self, format: InputFormat) -> ProcessOptions {
        let mut options = format
            .default_options()
            .with_extend(self.extend_bp)
            .with_remove_alt(!self.keep_alt)
            .with_remove_fix(!self.keep_fix);
        if self.standard_only {
            options = options.with_non_standard(false);
        } else if self.include_non_standard {
            options = options.with_non_standard(true);
        }
        options
    }

    fn requested(&self) -> Vec<String> {
        self.genes.as_deref().map(parse_symbols).unwrap_or_default()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert gene positions into a BED file
    Generate {
        /// Input file: gene table, record JSON or Ensembl response (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output BED file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a JSON report of records, diagnostics and missing genes
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Show a sample of genes before and after extension
    Preview {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of genes to show (default: 3 to 5)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Random seed for the sample
        #[arg(long, default_value = "42")]
        seed: u64,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Convert many input files in parallel
    Batch {
        /// Input files
        #[arg(short = 'i', long = "input", num_args = 1.., required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the <input stem>.bed outputs
        #[arg(short, long)]
        out_dir: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else {
        match verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    // Configure thread pool if --threads specified
    if let Some(n) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
        {
            error!("Failed to initialize thread pool: {}", e);
            process::exit(1);
        }
    }

    let result = match cli.command {
        Commands::Generate {
            input,
            output,
            report,
            pipeline,
        } => run_generate(input, output, report, pipeline),

        Commands::Preview {
            input,
            count,
            seed,
            pipeline,
        } => run_preview(input, count, seed, pipeline),

        Commands::Batch {
            inputs,
            out_dir,
            pipeline,
        } => run_batch(inputs, out_dir, pipeline),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}

/// Load one input and run the pipeline over it.
/// Returns the requested symbols that were not found alongside the output.
fn load_and_process(
    input: &Path,
    args: &PipelineArgs,
    pipeline: &Pipeline,
) -> Result<(Vec<String>, ProcessOutput), BedError> {
    let LoadedInput {
        format,
        lookup: LookupResult { records, not_found },
    } = load_input(input, args.format, &args.requested())?;
    let options = args.options(format);
    let output = pipeline.process_raw(records, &options)?;

    for symbol in &not_found {
        warn!("{}: gene not found: {}", input.display(), symbol);
    }
    for diagnostic in &output.diagnostics {
        if diagnostic.is_warning() {
            warn!("{}: {}", input.display(), diagnostic);
        } else {
            info!("{}: {}", input.display(), diagnostic);
        }
    }

    Ok((not_found, output))
}

fn run_generate(
    input: PathBuf,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    args: PipelineArgs,
) -> Result<(), BedError> {
    let pipeline = Pipeline::new(args.config());
    let (not_found, result) = load_and_process(&input, &args, &pipeline)?;

    match output {
        Some(path) => {
            let mut writer = BedWriter::new(File::create(&path)?);
            writer.write_all(&result.intervals)?;
            writer.flush()?;
            info!(
                "Wrote {} records to {}",
                result.intervals.len(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BedWriter::new(stdout.lock());
            writer.write_all(&result.intervals)?;
            writer.flush()?;
        }
    }

    if let Some(path) = report {
        let file = BufWriter::new(File::create(&path)?);
        Report::new(&result, &not_found).write_json(file)?;
    }

    Ok(())
}

fn run_preview(
    input: PathBuf,
    count: Option<usize>,
    seed: u64,
    args: PipelineArgs,
) -> Result<(), BedError> {
    let pipeline = Pipeline::new(args.config());
    let (_, result) = load_and_process(&input, &args, &pipeline)?;

    let preview = ExtensionPreview::sample(&result.unextended, &result.intervals, count, seed);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if preview.is_empty() {
        writeln!(handle, "No genes to preview")?;
    } else {
        write!(handle, "{}", preview)?;
    }
    Ok(())
}

fn run_batch(inputs: Vec<PathBuf>, out_dir: PathBuf, args: PipelineArgs) -> Result<(), BedError> {
    std::fs::create_dir_all(&out_dir)?;
    let pipeline = Pipeline::new(args.config());

    let outcomes = run_jobs(inputs, |input| {
        let result = batch_one(&input, &out_dir, &args, &pipeline);
        (input, result)
    });

    let mut failed = 0;
    for (input, outcome) in outcomes {
        match outcome {
            Ok((path, n)) => info!("{} -> {} ({} records)", input.display(), path.display(), n),
            Err(e) => {
                error!("{}: {}", input.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(BedError::InvalidFormat(format!(
            "{} input file(s) failed",
            failed
        )));
    }
    Ok(())
}

fn batch_one(
    input: &Path,
    out_dir: &Path,
    args: &PipelineArgs,
    pipeline: &Pipeline,
) -> Result<(PathBuf, usize), BedError> {
    let (_, result) = load_and_process(input, args, pipeline)?;

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "genes".to_string());
    let path = out_dir.join(format!("{}.bed", stem));

    let mut writer = BedWriter::new(File::create(&path)?);
    writer.write_all(&result.intervals)?;
    writer.flush()?;

    Ok((path, result.intervals.len()))
}
