// src/workflow/mod.rs

//! Pipeline stages and the iteration driver.
//!
//! - [`assemble`]: optional Flye run producing the initial contigs.
//! - [`mapping`]: index + map + convert + sort + index for one iteration.
//! - [`polish`]: one Pilon run.
//! - [`driver`]: the fixed-count MAPPING -> POLISHING -> CHECK loop.
//!
//! Stages coordinate only through files whose names are derived by
//! [`OutputNaming`], so re-running an iteration reproduces the same paths.

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::fs::absolutize;

pub mod assemble;
pub mod driver;
pub mod mapping;
pub mod polish;

pub use assemble::assemble_long_reads;
pub use driver::{DriverState, IterationState, PolishPlan, PolishWorkflow, WorkflowSummary};
pub use mapping::{Alignment, map_reads};
pub use polish::polish_assembly;

pub const SAM_EXT: &str = "sam";
pub const BAM_EXT: &str = "bam";
pub const INDEX_EXT: &str = "mmi";
pub const ASSEMBLY_EXT: &str = "fasta";

/// Deterministic `{out_dir}/{prefix}_{iteration}.{ext}` file naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    out_dir: PathBuf,
    prefix: String,
}

impl OutputNaming {
    pub fn new(out_dir: impl AsRef<Path>, prefix: impl Into<String>) -> Result<Self> {
        Ok(Self {
            out_dir: absolutize(out_dir)?,
            prefix: prefix.into(),
        })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// `{prefix}_{iteration}` without extension; Pilon's `--output` value.
    pub fn stem(&self, iteration: usize) -> String {
        format!("{}_{}", self.prefix, iteration)
    }

    pub fn file(&self, iteration: usize, ext: &str) -> PathBuf {
        self.out_dir.join(format!("{}.{}", self.stem(iteration), ext))
    }

    pub fn sam(&self, iteration: usize) -> PathBuf {
        self.file(iteration, SAM_EXT)
    }

    pub fn bam(&self, iteration: usize) -> PathBuf {
        self.file(iteration, BAM_EXT)
    }

    pub fn index(&self, iteration: usize) -> PathBuf {
        self.file(iteration, INDEX_EXT)
    }

    pub fn assembly(&self, iteration: usize) -> PathBuf {
        self.file(iteration, ASSEMBLY_EXT)
    }
}
