// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::tools::ToolTable;
use crate::types::{FlyeMode, Minimap2Setting};

/// File name of the container image shipped next to the sources.
pub const CONTAINER_IMAGE_NAME: &str = "HybridPolisher.sif";

pub const DEFAULT_MAX_ITER: usize = 4;
pub const DEFAULT_RAM_GB: u32 = 4;
pub const DEFAULT_PREFIX: &str = "pilon";

/// Image path used when `[execution].image` is not set.
pub fn default_container_image() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(CONTAINER_IMAGE_NAME)
}

/// Configuration exactly as deserialized from TOML.
///
/// ```toml
/// [execution]
/// local = false
/// image = "/opt/HybridPolisher.sif"
///
/// [polish]
/// max_iter = 3
/// prefix = "sample1"
///
/// [tools.pilon]
/// jar = "/opt/pilon/pilon-1.24.jar"
/// ```
///
/// All sections are optional and have reasonable defaults. Semantic checks
/// happen in the `TryFrom<RawConfigFile> for ConfigFile` conversion.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub execution: ExecutionSection,

    #[serde(default)]
    pub polish: PolishSection,

    /// Per-tool overrides from `[tools.<name>]`, keyed by tool name.
    #[serde(default)]
    pub tools: BTreeMap<String, ToolSection>,
}

/// `[execution]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionSection {
    /// Run tools directly on the host instead of inside a container.
    #[serde(default = "default_local")]
    pub local: bool,

    /// Container image; defaults to [`default_container_image`].
    #[serde(default)]
    pub image: Option<PathBuf>,

    /// Pause after every tool exits, in milliseconds.
    #[serde(default)]
    pub settle_ms: u64,

    /// Treat a non-zero tool exit status as a fatal error.
    #[serde(default)]
    pub fail_fast: bool,
}

fn default_local() -> bool {
    true
}

impl Default for ExecutionSection {
    fn default() -> Self {
        Self {
            local: default_local(),
            image: None,
            settle_ms: 0,
            fail_fast: false,
        }
    }
}

/// `[polish]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PolishSection {
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    /// JVM heap for Pilon, in gigabytes.
    #[serde(default = "default_ram_gb")]
    pub ram_gb: u32,

    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Minimap2 preset used for the short reads.
    #[serde(default)]
    pub mapping_setting: Minimap2Setting,

    /// Flye read-set mode for the optional assembly step.
    #[serde(default)]
    pub long_read_mode: FlyeMode,

    /// Thread count handed to Flye.
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_max_iter() -> usize {
    DEFAULT_MAX_ITER
}

fn default_ram_gb() -> u32 {
    DEFAULT_RAM_GB
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for PolishSection {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            ram_gb: default_ram_gb(),
            prefix: default_prefix(),
            mapping_setting: Minimap2Setting::default(),
            long_read_mode: FlyeMode::default(),
            threads: None,
        }
    }
}

/// `[tools.<name>]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ToolSection {
    #[serde(default)]
    pub binary: Option<String>,

    /// Only meaningful for Pilon.
    #[serde(default)]
    pub jar: Option<String>,

    #[serde(default)]
    pub extra_args: Vec<String>,
}

/// How tool invocations are launched.
///
/// Threaded explicitly from the driver down to every stage call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    pub local: bool,
    pub image: PathBuf,
    pub settle: Duration,
    pub fail_fast: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            local: true,
            image: default_container_image(),
            settle: Duration::ZERO,
            fail_fast: false,
        }
    }
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub execution: ExecutionConfig,
    pub polish: PolishSection,
    pub tools: ToolTable,
}

impl ConfigFile {
    /// Construct without validation. Only used by the `TryFrom` conversion.
    pub(crate) fn new_unchecked(
        execution: ExecutionConfig,
        polish: PolishSection,
        tools: ToolTable,
    ) -> Self {
        Self {
            execution,
            polish,
            tools,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            execution: ExecutionConfig::default(),
            polish: PolishSection::default(),
            tools: ToolTable::default(),
        }
    }
}
