// src/tools/passthrough.rs

use crate::tools::ToolSettings;

/// Positional arguments handed to a multi-purpose utility (samtools,
/// bcftools) verbatim. No validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PassThroughParams {
    args: Vec<String>,
}

impl PassThroughParams {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub(crate) fn build(&self, settings: &ToolSettings) -> Vec<String> {
        let mut args = vec![settings.binary.clone()];
        args.extend(self.args.iter().cloned());
        args
    }
}
