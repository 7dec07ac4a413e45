// src/tools/minimap2.rs

use std::path::{Path, PathBuf};

use crate::errors::{PolishError, Result};
use crate::fs::absolutize;
use crate::tools::{ToolSettings, extras, path_arg};
use crate::types::Minimap2Setting;

/// Parameters for a minimap2 call.
///
/// For [`Minimap2Setting::CreateIndex`] `target` is the contigs file and
/// `output` the index to write; for the mapping presets `target` is the index
/// (or contigs) to map against and `output` the SAM file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minimap2Params {
    setting: Minimap2Setting,
    target: PathBuf,
    reads: Vec<PathBuf>,
    output: PathBuf,
    extra_args: Vec<String>,
}

impl Minimap2Params {
    pub fn create_index(index_name: impl AsRef<Path>, contigs: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            setting: Minimap2Setting::CreateIndex,
            target: absolutize(contigs)?,
            reads: Vec::new(),
            output: absolutize(index_name)?,
            extra_args: Vec::new(),
        })
    }

    /// Map `reads` against `index`, falling back to `contigs` when no index
    /// is given.
    pub fn map<I, P>(
        setting: Minimap2Setting,
        index: Option<&Path>,
        contigs: Option<&Path>,
        reads: I,
        output: impl AsRef<Path>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        if !setting.is_mapping() {
            return Err(PolishError::ConfigError(
                "minimap2 index creation requested through the mapping constructor".to_string(),
            ));
        }
        let target = index.or(contigs).ok_or_else(|| {
            PolishError::ConfigError(
                "minimap2 reference is undefined: neither an index nor contigs were given"
                    .to_string(),
            )
        })?;
        let reads = reads
            .into_iter()
            .map(absolutize)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            setting,
            target: absolutize(target)?,
            reads,
            output: absolutize(output)?,
            extra_args: Vec::new(),
        })
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub(crate) fn build(&self, settings: &ToolSettings) -> Vec<String> {
        let mut args = vec![settings.binary.clone()];
        match self.setting {
            Minimap2Setting::CreateIndex => {
                args.push(self.setting.flag().to_string());
                args.push(path_arg(&self.output));
                args.extend(extras(&self.extra_args, settings));
                args.push(path_arg(&self.target));
            }
            preset => {
                args.push("-ax".to_string());
                args.push(preset.flag().to_string());
                args.extend(extras(&self.extra_args, settings));
                args.push(path_arg(&self.target));
                args.extend(self.reads.iter().map(|p| path_arg(p)));
                args.push("-o".to_string());
                args.push(path_arg(&self.output));
            }
        }
        args
    }
}
