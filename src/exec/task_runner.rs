// src/exec/task_runner.rs

//! Run one prepared command to completion.

use std::fs::File;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::info;

use crate::errors::{PolishError, Result};
use crate::exec::launch::PreparedCommand;
use crate::exec::ExitReport;

/// Spawn `cmd`, inheriting the full parent environment and stdio, and block
/// until it exits. No timeout, no retry.
pub async fn run_command(cmd: &PreparedCommand) -> Result<ExitReport> {
    let Some((program, args)) = cmd.argv.split_first() else {
        return Err(PolishError::ConfigError(format!(
            "empty command line for {}",
            cmd.tool
        )));
    };

    info!(
        tool = %cmd.tool,
        backend = %cmd.backend,
        program = cmd.program(),
        cmd = %cmd.display(),
        "executing"
    );

    let mut command = Command::new(program);
    command.args(args).kill_on_drop(true);

    if let Some(path) = &cmd.stdout {
        let file = File::create(path)
            .with_context(|| format!("creating stdout file {:?} for {}", path, cmd.tool))?;
        command.stdout(Stdio::from(file));
    }

    let mut child = command
        .spawn()
        .with_context(|| format!("spawning process for {} ({program})", cmd.tool))?;

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of {}", cmd.tool))?;

    let report = ExitReport {
        tool: cmd.tool,
        code: status.code(),
    };

    info!(
        tool = %cmd.tool,
        exit_code = report.exit_code(),
        success = report.success(),
        "tool process exited"
    );

    Ok(report)
}
