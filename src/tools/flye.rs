// src/tools/flye.rs

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::fs::absolutize;
use crate::tools::{ToolSettings, extras, path_arg};
use crate::types::FlyeMode;

/// Parameters for one Flye assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlyeParams {
    mode: FlyeMode,
    input_files: Vec<PathBuf>,
    out_dir: PathBuf,
    threads: Option<usize>,
    extra_args: Vec<String>,
}

impl FlyeParams {
    pub fn new<I, P>(mode: FlyeMode, input_files: I, out_dir: impl AsRef<Path>) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let input_files = input_files
            .into_iter()
            .map(absolutize)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            mode,
            input_files,
            out_dir: absolutize(out_dir)?,
            threads: None,
            extra_args: Vec::new(),
        })
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// `flye <mode> <reads...> --out-dir <dir> [extra...] [--threads N]`
    pub(crate) fn build(&self, settings: &ToolSettings) -> Vec<String> {
        let mut args = vec![settings.binary.clone(), self.mode.flag().to_string()];
        args.extend(self.input_files.iter().map(|p| path_arg(p)));
        args.push("--out-dir".to_string());
        args.push(path_arg(&self.out_dir));
        args.extend(extras(&self.extra_args, settings));
        if let Some(threads) = self.threads {
            args.push("--threads".to_string());
            args.push(threads.to_string());
        }
        args
    }
}
