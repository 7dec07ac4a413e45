// src/tools/mod.rs

//! Command construction for the wrapped bioinformatics tools.
//!
//! Every supported tool is one variant of [`Tool`], carrying that tool's typed
//! parameter struct. [`Tool::build_invocation`] is a pure function from the
//! parameters (plus the configured binary locations in [`ToolTable`]) to a
//! [`ToolInvocation`]; nothing here touches the filesystem or spawns anything.
//!
//! - [`flye`]: long-read assembly.
//! - [`minimap2`]: index creation and read mapping.
//! - [`pilon`]: short-read polishing.
//! - [`racon`]: consensus from overlaps.
//! - [`passthrough`]: samtools / bcftools, arguments appended verbatim.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::PolishError;

pub mod flye;
pub mod minimap2;
pub mod passthrough;
pub mod pilon;
pub mod racon;

pub use flye::FlyeParams;
pub use minimap2::Minimap2Params;
pub use passthrough::PassThroughParams;
pub use pilon::PilonParams;
pub use racon::RaconParams;

/// Identifier of a supported external tool.
///
/// This is the complete registry: resolving a name that is not listed here
/// fails with [`PolishError::ToolNotImplemented`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolKind {
    Flye,
    Minimap2,
    Pilon,
    Samtools,
    BcfTools,
    Racon,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Flye,
        ToolKind::Minimap2,
        ToolKind::Pilon,
        ToolKind::Samtools,
        ToolKind::BcfTools,
        ToolKind::Racon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Flye => "flye",
            ToolKind::Minimap2 => "minimap2",
            ToolKind::Pilon => "pilon",
            ToolKind::Samtools => "samtools",
            ToolKind::BcfTools => "bcftools",
            ToolKind::Racon => "racon",
        }
    }

    /// Binary used when the configuration does not override it.
    ///
    /// Pilon is a jar, so its "binary" is the JVM launcher.
    pub fn default_binary(&self) -> &'static str {
        match self {
            ToolKind::Pilon => "java",
            other => other.name(),
        }
    }
}

impl FromStr for ToolKind {
    type Err = PolishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| PolishError::ToolNotImplemented(s.to_string()))
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a tool lives and which extra arguments it always receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    pub binary: String,
    /// Archive path for jar-packaged tools (Pilon).
    pub jar: Option<PathBuf>,
    /// Appended to every invocation of this tool, after call-site extras.
    pub extra_args: Vec<String>,
}

impl ToolSettings {
    pub fn default_for(kind: ToolKind) -> Self {
        let jar = match kind {
            ToolKind::Pilon => Some(PathBuf::from(pilon::DEFAULT_PILON_JAR)),
            _ => None,
        };
        Self {
            binary: kind.default_binary().to_string(),
            jar,
            extra_args: Vec::new(),
        }
    }
}

/// Resolved settings for every tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolTable {
    entries: BTreeMap<ToolKind, ToolSettings>,
}

impl ToolTable {
    pub fn get(&self, kind: ToolKind) -> ToolSettings {
        self.entries
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| ToolSettings::default_for(kind))
    }

    pub fn set(&mut self, kind: ToolKind, settings: ToolSettings) {
        self.entries.insert(kind, settings);
    }
}

impl Default for ToolTable {
    fn default() -> Self {
        let entries = ToolKind::ALL
            .into_iter()
            .map(|kind| (kind, ToolSettings::default_for(kind)))
            .collect();
        Self { entries }
    }
}

/// One fully constructed external command.
///
/// `args[0]` is the program; the rest are its arguments in order. Some tools
/// (Racon) write their result to stdout, which is captured into `stdout`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    kind: ToolKind,
    args: Vec<String>,
    stdout: Option<PathBuf>,
}

impl ToolInvocation {
    pub fn new(kind: ToolKind, args: Vec<String>) -> Self {
        Self {
            kind,
            args,
            stdout: None,
        }
    }

    pub fn with_stdout(mut self, path: PathBuf) -> Self {
        self.stdout = Some(path);
        self
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn stdout(&self) -> Option<&Path> {
        self.stdout.as_deref()
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.join(" "))?;
        if let Some(out) = &self.stdout {
            write!(f, " > {}", out.display())?;
        }
        Ok(())
    }
}

/// A supported tool together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tool {
    Flye(FlyeParams),
    Minimap2(Minimap2Params),
    Pilon(PilonParams),
    Samtools(PassThroughParams),
    BcfTools(PassThroughParams),
    Racon(RaconParams),
}

impl Tool {
    pub fn kind(&self) -> ToolKind {
        match self {
            Tool::Flye(_) => ToolKind::Flye,
            Tool::Minimap2(_) => ToolKind::Minimap2,
            Tool::Pilon(_) => ToolKind::Pilon,
            Tool::Samtools(_) => ToolKind::Samtools,
            Tool::BcfTools(_) => ToolKind::BcfTools,
            Tool::Racon(_) => ToolKind::Racon,
        }
    }

    pub fn build_invocation(&self, tools: &ToolTable) -> ToolInvocation {
        let kind = self.kind();
        let settings = tools.get(kind);
        match self {
            Tool::Flye(p) => ToolInvocation::new(kind, p.build(&settings)),
            Tool::Minimap2(p) => ToolInvocation::new(kind, p.build(&settings)),
            Tool::Pilon(p) => ToolInvocation::new(kind, p.build(&settings)),
            Tool::Samtools(p) | Tool::BcfTools(p) => {
                ToolInvocation::new(kind, p.build(&settings))
            }
            Tool::Racon(p) => {
                ToolInvocation::new(kind, p.build(&settings)).with_stdout(p.output().to_path_buf())
            }
        }
    }
}

/// Token for an already-absolute path.
pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Call-site extras followed by configured extras.
pub(crate) fn extras<'a>(
    local: &'a [String],
    settings: &'a ToolSettings,
) -> impl Iterator<Item = String> + 'a {
    local.iter().chain(settings.extra_args.iter()).cloned()
}
