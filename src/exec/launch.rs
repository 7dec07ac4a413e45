// src/exec/launch.rs

//! Turn a [`ToolInvocation`] into the argv that is actually spawned.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::ExecutionConfig;
use crate::errors::{PolishError, Result};
use crate::exec::selector::select_backend;
use crate::fs::BindPaths;
use crate::tools::{ToolInvocation, ToolKind};
use crate::types::ExecutionBackend;

/// A launch-ready command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCommand {
    pub tool: ToolKind,
    pub backend: ExecutionBackend,
    /// Full argv, container wrapper included.
    pub argv: Vec<String>,
    /// Redirect target for the child's stdout.
    pub stdout: Option<PathBuf>,
    /// Files the tool is expected to produce.
    pub outputs: Vec<PathBuf>,
    /// Host directories the stage asked to expose; only used by container
    /// backends.
    pub binds: Option<BindPaths>,
}

impl PreparedCommand {
    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    pub fn display(&self) -> String {
        let mut line = self.argv.join(" ");
        if let Some(out) = &self.stdout {
            line.push_str(&format!(" > {}", out.display()));
        }
        line
    }
}

/// Select a backend and wrap `invocation` for it.
pub fn prepare(
    invocation: &ToolInvocation,
    outputs: Vec<PathBuf>,
    execution: &ExecutionConfig,
    binds: Option<&BindPaths>,
) -> Result<PreparedCommand> {
    let backend = select_backend(execution)?;
    prepare_with_backend(invocation, outputs, backend, execution, binds)
}

/// Wrap `invocation` for an already selected backend.
///
/// A container backend requires the image file to exist.
pub fn prepare_with_backend(
    invocation: &ToolInvocation,
    outputs: Vec<PathBuf>,
    backend: ExecutionBackend,
    execution: &ExecutionConfig,
    binds: Option<&BindPaths>,
) -> Result<PreparedCommand> {
    if backend.is_container() && !execution.image.is_file() {
        return Err(PolishError::ContainerImageMissing(execution.image.clone()));
    }
    Ok(PreparedCommand {
        tool: invocation.kind(),
        backend,
        argv: launch_argv(backend, &execution.image, invocation, binds),
        stdout: invocation.stdout().map(Path::to_path_buf),
        outputs,
        binds: binds.cloned(),
    })
}

/// Build the argv for `backend`:
///
/// - local: the invocation unchanged
/// - container with binds: `[runtime, run, --bind, a,b, image, ...]`
/// - container without binds: `[runtime, run, image, ...]`, with a warning
pub fn launch_argv(
    backend: ExecutionBackend,
    image: &Path,
    invocation: &ToolInvocation,
    binds: Option<&BindPaths>,
) -> Vec<String> {
    let Some(runtime) = backend.runtime_binary() else {
        return invocation.args().to_vec();
    };

    let mut argv = vec![runtime.to_string(), "run".to_string()];
    match binds.filter(|b| !b.is_empty()) {
        Some(binds) => {
            argv.push("--bind".to_string());
            argv.push(binds.joined());
        }
        None => {
            warn!(
                tool = %invocation.kind(),
                backend = %backend,
                "no bind mounts specified for container execution; data will not be visible inside the container"
            );
        }
    }
    argv.push(image.to_string_lossy().into_owned());
    argv.extend(invocation.args().iter().cloned());
    argv
}
