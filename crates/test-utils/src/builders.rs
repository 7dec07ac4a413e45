use std::path::{Path, PathBuf};

use hybrid_polisher::config::{ConfigFile, RawConfigFile, ToolSection};
use hybrid_polisher::types::Minimap2Setting;
use hybrid_polisher::workflow::PolishPlan;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn max_iter(mut self, n: usize) -> Self {
        self.config.polish.max_iter = n;
        self
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.config.polish.prefix = prefix.to_string();
        self
    }

    pub fn ram_gb(mut self, gb: u32) -> Self {
        self.config.polish.ram_gb = gb;
        self
    }

    pub fn local(mut self, local: bool) -> Self {
        self.config.execution.local = local;
        self
    }

    pub fn image(mut self, image: impl AsRef<Path>) -> Self {
        self.config.execution.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn fail_fast(mut self, val: bool) -> Self {
        self.config.execution.fail_fast = val;
        self
    }

    pub fn with_tool(mut self, name: &str, section: ToolSection) -> Self {
        self.config.tools.insert(name.to_string(), section);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `PolishPlan` with short-read defaults.
pub struct PolishPlanBuilder {
    plan: PolishPlan,
}

impl PolishPlanBuilder {
    pub fn new(contigs: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            plan: PolishPlan {
                contigs: contigs.into(),
                reads: Vec::new(),
                out_dir: out_dir.into(),
                prefix: "test".to_string(),
                max_iter: 4,
                ram_gb: 4,
                mapping_setting: Minimap2Setting::MapIllumina,
            },
        }
    }

    pub fn read(mut self, path: impl Into<PathBuf>) -> Self {
        self.plan.reads.push(path.into());
        self
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.plan.prefix = prefix.to_string();
        self
    }

    pub fn max_iter(mut self, n: usize) -> Self {
        self.plan.max_iter = n;
        self
    }

    pub fn ram_gb(mut self, gb: u32) -> Self {
        self.plan.ram_gb = gb;
        self
    }

    pub fn build(self) -> PolishPlan {
        self.plan
    }
}
