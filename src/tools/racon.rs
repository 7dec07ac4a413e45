// src/tools/racon.rs

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::fs::absolutize;
use crate::tools::{ToolSettings, extras, path_arg};

/// Parameters for one Racon consensus round. Racon prints the consensus on
/// stdout, which the executor redirects into `output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaconParams {
    reads: Vec<PathBuf>,
    overlaps: PathBuf,
    contigs: PathBuf,
    output: PathBuf,
    extra_args: Vec<String>,
}

impl RaconParams {
    pub fn new<I, P>(
        reads: I,
        overlaps: impl AsRef<Path>,
        contigs: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let reads = reads
            .into_iter()
            .map(absolutize)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            reads,
            overlaps: absolutize(overlaps)?,
            contigs: absolutize(contigs)?,
            output: absolutize(output)?,
            extra_args: Vec::new(),
        })
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub(crate) fn build(&self, settings: &ToolSettings) -> Vec<String> {
        let mut args = vec![settings.binary.clone()];
        args.extend(self.reads.iter().map(|p| path_arg(p)));
        args.push(path_arg(&self.overlaps));
        args.push(path_arg(&self.contigs));
        args.extend(extras(&self.extra_args, settings));
        args
    }
}
