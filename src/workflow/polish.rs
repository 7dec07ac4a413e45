// src/workflow/polish.rs

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::errors::Result;
use crate::exec::{Executor, ExecutorBackend};
use crate::fs::{BindPaths, FileSystem, absolutize};
use crate::tools::{PilonParams, Tool};

/// Run Pilon over one contigs/alignment pair and return the path of the
/// polished assembly, `{out_dir}/{output_name}.fasta`.
///
/// `out_dir` is created if absent. The returned file is not checked here;
/// that is the driver's job.
pub async fn polish_assembly<B: ExecutorBackend>(
    executor: &mut Executor<B>,
    fs: &dyn FileSystem,
    contigs: &Path,
    bam: &Path,
    output_name: &str,
    out_dir: &Path,
    ram_gb: u32,
) -> Result<PathBuf> {
    let out_dir = absolutize(out_dir)?;
    if !fs.is_dir(&out_dir) {
        info!(out_dir = ?out_dir, "creating polishing output directory");
        fs.create_dir_all(&out_dir)
            .with_context(|| format!("creating Pilon output directory {:?}", out_dir))?;
    }

    let params = PilonParams::new(contigs, bam, output_name, &out_dir, ram_gb)?;
    let assembly = params.expected_assembly();

    let mut binds = BindPaths::for_files([params.bam(), params.contigs()])?;
    binds.add_dir(params.out_dir())?;

    info!(contigs = ?params.contigs(), bam = ?params.bam(), output = %output_name, "polishing assembly");
    executor
        .run(Tool::Pilon(params), vec![assembly.clone()], Some(&binds))
        .await?;

    Ok(assembly)
}
