// src/workflow/mapping.rs

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::{Executor, ExecutorBackend};
use crate::fs::{BindPaths, absolutize};
use crate::tools::{Minimap2Params, PassThroughParams, Tool};
use crate::types::Minimap2Setting;
use crate::workflow::OutputNaming;

/// Files produced by one mapping stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub sam: PathBuf,
    /// Sorted and indexed.
    pub bam: PathBuf,
}

/// Build a sorted, indexed alignment of `reads` against `contigs`.
///
/// Strictly sequential: minimap2 index, minimap2 map, `samtools view`,
/// `samtools sort` (in place), `samtools index`. Exit statuses are not
/// inspected between steps unless the executor runs with `fail_fast`.
///
/// The index is built every time although mapping runs against the contigs
/// directly.
pub async fn map_reads<B: ExecutorBackend>(
    executor: &mut Executor<B>,
    naming: &OutputNaming,
    setting: Minimap2Setting,
    contigs: &Path,
    reads: &[PathBuf],
    iteration: usize,
) -> Result<Alignment> {
    let contigs = absolutize(contigs)?;
    let index = naming.index(iteration);
    let sam = naming.sam(iteration);
    let bam = naming.bam(iteration);

    info!(iteration, contigs = ?contigs, "mapping reads");

    let mut binds = BindPaths::for_files(reads)?;
    binds.add_file(&contigs)?;
    binds.add_dir(naming.out_dir())?;

    debug!(iteration, index = ?index, "building minimap2 index");
    executor
        .run(
            Tool::Minimap2(Minimap2Params::create_index(&index, &contigs)?),
            vec![index.clone()],
            Some(&binds),
        )
        .await?;

    executor
        .run(
            Tool::Minimap2(Minimap2Params::map(
                setting,
                None,
                Some(contigs.as_path()),
                reads,
                &sam,
            )?),
            vec![sam.clone()],
            Some(&binds),
        )
        .await?;

    let samtools_binds = BindPaths::for_files([&sam])?;
    let sam_arg = sam.to_string_lossy().into_owned();
    let sam_arg = sam_arg.as_str();
    let bam_arg = bam.to_string_lossy().into_owned();
    let bam_arg = bam_arg.as_str();

    debug!(iteration, bam = ?bam, "converting, sorting and indexing alignment");
    executor
        .run(
            Tool::Samtools(PassThroughParams::new([
                "view", "-bu", "-o", bam_arg, sam_arg,
            ])),
            vec![bam.clone()],
            Some(&samtools_binds),
        )
        .await?;

    executor
        .run(
            Tool::Samtools(PassThroughParams::new([
                "sort", "-o", bam_arg, bam_arg,
            ])),
            vec![bam.clone()],
            Some(&samtools_binds),
        )
        .await?;

    executor
        .run(
            Tool::Samtools(PassThroughParams::new(["index", bam_arg])),
            vec![PathBuf::from(format!("{bam_arg}.bai"))],
            Some(&samtools_binds),
        )
        .await?;

    Ok(Alignment { sam, bam })
}
