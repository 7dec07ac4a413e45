// src/tools/pilon.rs

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::fs::absolutize;
use crate::tools::{ToolSettings, extras, path_arg};

pub const DEFAULT_PILON_JAR: &str = "/usr/bin/pilon.jar";

/// Report flags appended to every Pilon run: change list plus VCF output.
pub const DEFAULT_REPORT_FLAGS: [&str; 3] = ["--changes", "--vcf", "--vcfqe"];

/// Parameters for one Pilon polishing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PilonParams {
    contigs: PathBuf,
    bam: PathBuf,
    output: String,
    out_dir: PathBuf,
    ram_gb: u32,
    extra_args: Vec<String>,
}

impl PilonParams {
    pub fn new(
        contigs: impl AsRef<Path>,
        bam: impl AsRef<Path>,
        output: impl Into<String>,
        out_dir: impl AsRef<Path>,
        ram_gb: u32,
    ) -> Result<Self> {
        Ok(Self {
            contigs: absolutize(contigs)?,
            bam: absolutize(bam)?,
            output: output.into(),
            out_dir: absolutize(out_dir)?,
            ram_gb,
            extra_args: Vec::new(),
        })
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Path of the polished assembly Pilon writes.
    pub fn expected_assembly(&self) -> PathBuf {
        self.out_dir.join(format!("{}.fasta", self.output))
    }

    pub fn contigs(&self) -> &Path {
        &self.contigs
    }

    pub fn bam(&self) -> &Path {
        &self.bam
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub(crate) fn build(&self, settings: &ToolSettings) -> Vec<String> {
        let jar = settings
            .jar
            .as_deref()
            .map(path_arg)
            .unwrap_or_else(|| DEFAULT_PILON_JAR.to_string());
        let mut args = vec![
            settings.binary.clone(),
            format!("-Xmx{}G", self.ram_gb),
            "-jar".to_string(),
            jar,
            "--genome".to_string(),
            path_arg(&self.contigs),
            "--bam".to_string(),
            path_arg(&self.bam),
            "--output".to_string(),
            self.output.clone(),
            "--outdir".to_string(),
            path_arg(&self.out_dir),
        ];
        args.extend(extras(&self.extra_args, settings));
        args.extend(DEFAULT_REPORT_FLAGS.iter().map(|s| s.to_string()));
        args
    }
}
