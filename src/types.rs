use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Read-set mode handed to Flye.
///
/// Each variant maps onto exactly one Flye input flag (`--nano-hq`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlyeMode {
    PacbioRaw,
    PacbioCorr,
    PacbioHifi,
    NanoRaw,
    NanoCorr,
    NanoHq,
}

impl FlyeMode {
    pub const ALL: [FlyeMode; 6] = [
        FlyeMode::PacbioRaw,
        FlyeMode::PacbioCorr,
        FlyeMode::PacbioHifi,
        FlyeMode::NanoRaw,
        FlyeMode::NanoCorr,
        FlyeMode::NanoHq,
    ];

    pub fn flag(&self) -> &'static str {
        match self {
            FlyeMode::PacbioRaw => "--pacbio-raw",
            FlyeMode::PacbioCorr => "--pacbio-corr",
            FlyeMode::PacbioHifi => "--pacbio-hifi",
            FlyeMode::NanoRaw => "--nano-raw",
            FlyeMode::NanoCorr => "--nano-corr",
            FlyeMode::NanoHq => "--nano-hq",
        }
    }
}

impl Default for FlyeMode {
    fn default() -> Self {
        FlyeMode::NanoHq
    }
}

impl FromStr for FlyeMode {
    type Err = String;

    /// Accepts both the bare tag (`nano-hq`) and the Flye flag (`--nano-hq`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        let tag = tag.trim_start_matches("--");
        FlyeMode::ALL
            .into_iter()
            .find(|mode| &mode.flag()[2..] == tag)
            .ok_or_else(|| {
                format!(
                    "invalid long read mode: {s} (expected one of pacbio-raw, pacbio-corr, \
                     pacbio-hifi, nano-raw, nano-corr, nano-hq)"
                )
            })
    }
}

impl fmt::Display for FlyeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flag()[2..])
    }
}

/// Minimap2 operating mode: either index creation or one of the mapping
/// presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Minimap2Setting {
    #[serde(rename = "index")]
    CreateIndex,
    #[serde(rename = "sr")]
    MapIllumina,
    #[serde(rename = "map-pb")]
    MapPacbio,
    #[serde(rename = "map-ont")]
    MapOnt,
}

impl Minimap2Setting {
    pub fn flag(&self) -> &'static str {
        match self {
            Minimap2Setting::CreateIndex => "-d",
            Minimap2Setting::MapIllumina => "sr",
            Minimap2Setting::MapPacbio => "map-pb",
            Minimap2Setting::MapOnt => "map-ont",
        }
    }

    pub fn is_mapping(&self) -> bool {
        !matches!(self, Minimap2Setting::CreateIndex)
    }
}

impl Default for Minimap2Setting {
    fn default() -> Self {
        Minimap2Setting::MapIllumina
    }
}

impl FromStr for Minimap2Setting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "index" | "-d" => Ok(Minimap2Setting::CreateIndex),
            "sr" => Ok(Minimap2Setting::MapIllumina),
            "map-pb" => Ok(Minimap2Setting::MapPacbio),
            "map-ont" => Ok(Minimap2Setting::MapOnt),
            other => Err(format!(
                "invalid minimap2 setting: {other} (expected \"index\", \"sr\", \"map-pb\" or \"map-ont\")"
            )),
        }
    }
}

/// Where a tool invocation actually runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionBackend {
    /// Run directly on the host.
    Local,
    Apptainer,
    Singularity,
}

impl ExecutionBackend {
    /// Container runtimes in probe priority order.
    pub const CONTAINER_RUNTIMES: [ExecutionBackend; 2] =
        [ExecutionBackend::Apptainer, ExecutionBackend::Singularity];

    /// Runtime binary name, `None` for host execution.
    pub fn runtime_binary(&self) -> Option<&'static str> {
        match self {
            ExecutionBackend::Local => None,
            ExecutionBackend::Apptainer => Some("apptainer"),
            ExecutionBackend::Singularity => Some("singularity"),
        }
    }

    pub fn is_container(&self) -> bool {
        self.runtime_binary().is_some()
    }
}

impl fmt::Display for ExecutionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.runtime_binary().unwrap_or("local"))
    }
}
