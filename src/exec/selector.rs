// src/exec/selector.rs

//! Decide whether a tool runs on the host or inside a container runtime.

use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;

use tracing::debug;

use crate::config::ExecutionConfig;
use crate::errors::{PolishError, Result};
use crate::types::ExecutionBackend;

/// Resolve the backend for one invocation, probing the process `PATH`.
///
/// Not cached: every call probes again.
pub fn select_backend(execution: &ExecutionConfig) -> Result<ExecutionBackend> {
    let path_var = env::var_os("PATH");
    select_backend_with_path(execution, path_var.as_deref())
}

/// Same as [`select_backend`] with an explicit search path.
///
/// - `local = true` always wins.
/// - Otherwise the first of apptainer, singularity found on `path_var`.
/// - Neither found is [`PolishError::NoExecutionBackend`].
pub fn select_backend_with_path(
    execution: &ExecutionConfig,
    path_var: Option<&OsStr>,
) -> Result<ExecutionBackend> {
    if execution.local {
        return Ok(ExecutionBackend::Local);
    }

    for backend in ExecutionBackend::CONTAINER_RUNTIMES {
        let Some(binary) = backend.runtime_binary() else {
            continue;
        };
        if let Some(found) = find_in_path(binary, path_var) {
            debug!(backend = %backend, path = ?found, "container runtime found");
            return Ok(backend);
        }
    }

    Err(PolishError::NoExecutionBackend)
}

/// Locate `name` as a regular file in one of the directories of `path_var`.
pub fn find_in_path(name: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let paths = path_var?;
    env::split_paths(paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
