// src/workflow/assemble.rs

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::errors::{PolishError, Result};
use crate::exec::{Executor, ExecutorBackend};
use crate::fs::{BindPaths, FileSystem, absolutize};
use crate::tools::{FlyeParams, Tool};
use crate::types::FlyeMode;

/// Name of the final assembly Flye writes into its output directory.
pub const FLYE_ASSEMBLY_NAME: &str = "assembly.fasta";

/// Assemble `long_reads` with Flye into `out_dir` and return the path of the
/// resulting assembly.
///
/// A missing `assembly.fasta` after Flye exits is fatal.
pub async fn assemble_long_reads<B: ExecutorBackend>(
    executor: &mut Executor<B>,
    fs: &dyn FileSystem,
    mode: FlyeMode,
    long_reads: &[PathBuf],
    out_dir: &Path,
    threads: Option<usize>,
) -> Result<PathBuf> {
    if long_reads.is_empty() {
        return Err(PolishError::ConfigError(
            "long-read assembly requested without any read files".to_string(),
        ));
    }

    let out_dir = absolutize(out_dir)?;
    fs.create_dir_all(&out_dir)
        .with_context(|| format!("creating Flye output directory {:?}", out_dir))?;

    let mut params = FlyeParams::new(mode, long_reads, &out_dir)?;
    if let Some(threads) = threads {
        params = params.with_threads(threads);
    }
    let assembly = out_dir.join(FLYE_ASSEMBLY_NAME);

    let binds = BindPaths::for_files(params.input_files())?.with_dir(params.out_dir())?;

    info!(mode = %mode, reads = long_reads.len(), out_dir = ?out_dir, "assembling long reads");
    executor
        .run(Tool::Flye(params), vec![assembly.clone()], Some(&binds))
        .await?;

    if !fs.is_file(&assembly) {
        return Err(PolishError::MissingOutput(assembly));
    }
    Ok(assembly)
}
