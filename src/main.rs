use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use txpack::{CompressConfig, DEFAULT_DICTIONARY_FILE, DEFAULT_OUTPUT_FILE, SizeReport, compress};

/// Output locations shared by the compress and stats commands.
#[derive(Debug, Parser)]
struct OutputArgs {
    /// Where the pruned sequence dictionary is written
    #[arg(
        short = 'd',
        long = "dictionary",
        value_name = "PATH",
        default_value = DEFAULT_DICTIONARY_FILE
    )]
    dictionary: PathBuf,

    /// Where the rewritten dataset is written
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = DEFAULT_OUTPUT_FILE
    )]
    output: PathBuf,
}

#[derive(Debug, Parser)]
struct CompressArgs {
    /// The input dataset: one transaction per line, items as
    /// whitespace-separated non-negative integers
    input: PathBuf,

    /// Output locations
    #[command(flatten)]
    out: OutputArgs,

    /// Window lengths to substitute, strictly decreasing
    #[arg(
        long = "lengths",
        value_name = "L,L,..",
        value_delimiter = ',',
        default_value = "5,4,3"
    )]
    lengths: Vec<usize>,
}

#[derive(Debug, Parser)]
struct StatsArgs {
    /// The original (uncompressed) dataset
    input: PathBuf,

    /// Artifact locations to measure
    #[command(flatten)]
    out: OutputArgs,
}

/// The top-level CLI definition with subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the sequence dictionary, rewrite the dataset, and report sizes
    Compress(CompressArgs),

    /// Recompute the size-reduction report for existing artifacts
    Stats(StatsArgs),
}

#[derive(Debug, Parser)]
#[command(name = "txpack", author, version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Compress(args) => cmd_compress(args),
        Commands::Stats(args) => cmd_stats(args),
    }
}

/// `txpack compress <input> [-d map] [-o data] [--lengths 5,4,3]`
fn cmd_compress(args: CompressArgs) -> Result<()> {
    eprintln!("Compressing transaction dataset");
    eprintln!("   Input: {}", args.input.display());
    eprintln!("   Dictionary: {}", args.out.dictionary.display());
    eprintln!("   Output: {}", args.out.output.display());

    let config = CompressConfig {
        input: args.input,
        dictionary_path: args.out.dictionary,
        output_path: args.out.output,
        lengths: args.lengths,
    };

    let report = compress(&config)?;
    println!("{}", report);
    Ok(())
}

/// `txpack stats <input> [-d map] [-o data]`
/// Measures already-produced artifacts without recomputing anything.
fn cmd_stats(args: StatsArgs) -> Result<()> {
    let report = SizeReport::measure(&args.input, &args.out.dictionary, &args.out.output);
    println!("{}", report);
    Ok(())
}
