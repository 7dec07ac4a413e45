// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`selector`] decides between host execution and a container runtime.
//! - [`launch`] wraps a tool invocation into the final argv.
//! - [`task_runner`] spawns one process and waits for it.
//! - [`backend`] provides the `ExecutorBackend` trait with the real and
//!   dry-run implementations; tests plug in a fake.
//!
//! [`Executor`] ties these together for the pipeline stages.

pub mod backend;
pub mod launch;
pub mod selector;
pub mod task_runner;

use std::path::PathBuf;

use tracing::{debug, warn};

pub use backend::{DryRunBackend, ExecutorBackend, RealExecutorBackend};
pub use launch::PreparedCommand;

use crate::config::ExecutionConfig;
use crate::errors::{PolishError, Result};
use crate::fs::BindPaths;
use crate::tools::{Tool, ToolKind, ToolTable};

/// How a tool process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitReport {
    pub tool: ToolKind,
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ExitReport {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn exit_code(&self) -> i32 {
        self.code.unwrap_or(-1)
    }
}

/// Builds, wraps and runs tool invocations one at a time.
pub struct Executor<B: ExecutorBackend> {
    execution: ExecutionConfig,
    tools: ToolTable,
    backend: B,
}

impl<B: ExecutorBackend> Executor<B> {
    pub fn new(execution: ExecutionConfig, tools: ToolTable, backend: B) -> Self {
        Self {
            execution,
            tools,
            backend,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run `tool` to completion.
    ///
    /// `outputs` are the files the tool is expected to write; they are handed
    /// to the backend but not checked here. A non-zero exit is logged and
    /// returned, and only becomes an error with `fail_fast`.
    pub async fn run(
        &mut self,
        tool: Tool,
        outputs: Vec<PathBuf>,
        binds: Option<&BindPaths>,
    ) -> Result<ExitReport> {
        let invocation = tool.build_invocation(&self.tools);
        debug!(tool = %invocation.kind(), invocation = %invocation, "built tool invocation");
        let prepared = launch::prepare(&invocation, outputs, &self.execution, binds)?;
        let report = self.backend.execute(prepared).await?;

        if !self.execution.settle.is_zero() {
            tokio::time::sleep(self.execution.settle).await;
        }

        if !report.success() {
            if self.execution.fail_fast {
                return Err(PolishError::ToolFailed {
                    tool: report.tool.to_string(),
                    code: report.exit_code(),
                });
            }
            warn!(
                tool = %report.tool,
                exit_code = report.exit_code(),
                "tool exited unsuccessfully; continuing"
            );
        }

        Ok(report)
    }
}
