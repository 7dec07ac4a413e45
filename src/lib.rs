// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod tools;
pub mod types;
pub mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, RawConfigFile, load_or_default};
use crate::errors::{PolishError, Result};
use crate::exec::{DryRunBackend, Executor, ExecutorBackend, RealExecutorBackend};
use crate::fs::mock::MockFileSystem;
use crate::fs::{FileSystem, RealFileSystem};
use crate::workflow::{PolishPlan, PolishWorkflow, WorkflowSummary, assemble_long_reads};

/// Subdirectory of the output directory used for the Flye run.
pub const ASSEMBLY_SUBDIR: &str = "flye";

/// Input files of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineInputs {
    pub contigs: Option<PathBuf>,
    pub reads: Vec<PathBuf>,
    pub long_reads: Vec<PathBuf>,
    pub out_dir: PathBuf,
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - the executor backend (real or dry-run)
/// - optional long-read assembly
/// - the polishing loop
pub async fn run(args: CliArgs) -> Result<()> {
    let mut raw = load_or_default(args.config.as_deref())?;
    apply_cli_overrides(&mut raw, &args);
    let cfg = ConfigFile::try_from(raw)?;

    let out_dir = match &args.out_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let inputs = PipelineInputs {
        contigs: args.contigs.clone(),
        reads: args.reads.clone(),
        long_reads: args.long_reads.clone(),
        out_dir,
    };

    let summary = if args.dry_run {
        // Nothing touches the real filesystem in a dry run.
        let fs: Arc<dyn FileSystem> = Arc::new(MockFileSystem::new());
        let backend = DryRunBackend::new(Arc::clone(&fs));
        run_pipeline(inputs, &cfg, backend, fs).await?
    } else {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        run_pipeline(inputs, &cfg, RealExecutorBackend::new(), fs).await?
    };

    if let Some(assembly) = summary.final_assembly() {
        info!(iterations = summary.iterations, assembly = ?assembly, "final assembly");
    }
    debug!("run complete");
    Ok(())
}

/// Run the whole pipeline against an arbitrary backend and filesystem.
///
/// Contigs come from `inputs.contigs`, or from a Flye assembly of
/// `inputs.long_reads` when no contigs are given. Long reads passed together
/// with contigs are ignored with a warning.
pub async fn run_pipeline<B: ExecutorBackend>(
    inputs: PipelineInputs,
    cfg: &ConfigFile,
    backend: B,
    fs: Arc<dyn FileSystem>,
) -> Result<WorkflowSummary> {
    let mut executor = Executor::new(cfg.execution.clone(), cfg.tools.clone(), backend);

    let contigs = match inputs.contigs {
        Some(contigs) => {
            if !inputs.long_reads.is_empty() {
                warn!(
                    contigs = ?contigs,
                    long_reads = inputs.long_reads.len(),
                    "contigs given; skipping long-read assembly"
                );
            }
            contigs
        }
        None if !inputs.long_reads.is_empty() => {
            assemble_long_reads(
                &mut executor,
                fs.as_ref(),
                cfg.polish.long_read_mode,
                &inputs.long_reads,
                &inputs.out_dir.join(ASSEMBLY_SUBDIR),
                cfg.polish.threads,
            )
            .await?
        }
        None => {
            return Err(PolishError::ConfigError(
                "no contigs given: pass --contigs or --long-reads".to_string(),
            ));
        }
    };

    let plan = PolishPlan {
        contigs,
        reads: inputs.reads,
        out_dir: inputs.out_dir,
        prefix: cfg.polish.prefix.clone(),
        max_iter: cfg.polish.max_iter,
        ram_gb: cfg.polish.ram_gb,
        mapping_setting: cfg.polish.mapping_setting,
    };

    info!(
        contigs = ?plan.contigs,
        reads = plan.reads.len(),
        max_iter = plan.max_iter,
        prefix = %plan.prefix,
        local = cfg.execution.local,
        "starting iterative polishing"
    );

    let mut workflow = PolishWorkflow::new(plan, executor, fs)?;
    workflow.run().await
}

/// CLI flags take precedence over config file values.
pub fn apply_cli_overrides(raw: &mut RawConfigFile, args: &CliArgs) {
    if let Some(max_iter) = args.max_iter {
        raw.polish.max_iter = max_iter;
    }
    if let Some(ram) = args.ram {
        raw.polish.ram_gb = ram;
    }
    if let Some(prefix) = &args.prefix {
        raw.polish.prefix = prefix.clone();
    }
    if let Some(mode) = args.long_read_mode {
        raw.polish.long_read_mode = mode;
    }
}
