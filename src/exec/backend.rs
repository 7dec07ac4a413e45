// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The stages talk to an `ExecutorBackend` instead of spawning processes
//! directly, so tests can swap in a fake that records argv vectors and
//! fabricates outputs.
//!
//! - `RealExecutorBackend` spawns the process (production).
//! - `DryRunBackend` prints each command and marks its declared outputs as
//!   present on the given filesystem, without spawning anything.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::errors::Result;
use crate::exec::launch::PreparedCommand;
use crate::exec::task_runner::run_command;
use crate::exec::ExitReport;
use crate::fs::FileSystem;

/// Trait abstracting how prepared commands are executed.
pub trait ExecutorBackend: Send {
    /// Run `cmd` to completion and report its exit status.
    fn execute(
        &mut self,
        cmd: PreparedCommand,
    ) -> Pin<Box<dyn Future<Output = Result<ExitReport>> + Send + '_>>;
}

/// Real executor backend used in production.
#[derive(Debug, Default)]
pub struct RealExecutorBackend;

impl RealExecutorBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ExecutorBackend for RealExecutorBackend {
    fn execute(
        &mut self,
        cmd: PreparedCommand,
    ) -> Pin<Box<dyn Future<Output = Result<ExitReport>> + Send + '_>> {
        Box::pin(async move { run_command(&cmd).await })
    }
}

/// Prints commands instead of running them.
#[derive(Debug)]
pub struct DryRunBackend {
    fs: Arc<dyn FileSystem>,
    printed: usize,
}

impl DryRunBackend {
    /// `fs` receives an empty placeholder for every declared output, so the
    /// driver's existence checks pass.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs, printed: 0 }
    }

    pub fn printed(&self) -> usize {
        self.printed
    }
}

impl ExecutorBackend for DryRunBackend {
    fn execute(
        &mut self,
        cmd: PreparedCommand,
    ) -> Pin<Box<dyn Future<Output = Result<ExitReport>> + Send + '_>> {
        Box::pin(async move {
            self.printed += 1;
            println!("[{}] {}", self.printed, cmd.display());
            for output in &cmd.outputs {
                self.fs.write(output, b"")?;
            }
            Ok(ExitReport {
                tool: cmd.tool,
                code: Some(0),
            })
        })
    }
}
