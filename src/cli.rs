// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};

use crate::types::FlyeMode;

/// Command-line arguments for `hybrid-polisher`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hybrid-polisher",
    version,
    about = "Iterative polishing of an assembly using Illumina paired-end reads.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to assembled contigs.
    #[arg(short = 'c', long, value_name = "PATH")]
    pub contigs: Option<PathBuf>,

    /// Paired end reads used for generation of the assembly.
    #[arg(short = 'r', long, value_name = "PATH", num_args = 1..)]
    pub reads: Vec<PathBuf>,

    /// Max number of iterations to perform with Pilon. Default: 4
    #[arg(short = 'm', long, value_name = "N")]
    pub max_iter: Option<usize>,

    /// Memory to be passed to the Pilon JVM, in GB. Default: 4
    #[arg(short = 'a', long, value_name = "GB")]
    pub ram: Option<u32>,

    /// Prefix name to use for outputs. Default: pilon
    #[arg(short = 'p', long, value_name = "NAME")]
    pub prefix: Option<String>,

    /// Directory for all outputs. Default: the current directory.
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Long reads to assemble with Flye when no `--contigs` are given.
    #[arg(long, value_name = "PATH", num_args = 1..)]
    pub long_reads: Vec<PathBuf>,

    /// Flye read-set mode (pacbio-raw, pacbio-corr, pacbio-hifi, nano-raw,
    /// nano-corr, nano-hq). Default: nano-hq
    #[arg(long, value_name = "MODE")]
    pub long_read_mode: Option<FlyeMode>,

    /// Optional TOML config file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the commands that would run, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `HYBRID_POLISHER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse the process arguments.
///
/// With no arguments at all the usage text is printed and the process exits
/// with status 1.
pub fn parse() -> CliArgs {
    if std::env::args_os().len() <= 1 {
        print_usage();
        std::process::exit(1);
    }
    CliArgs::parse()
}

pub fn print_usage() {
    let mut cmd = CliArgs::command();
    if cmd.print_help().is_err() {
        eprintln!("{}", cmd.render_usage());
    }
    println!();
}
