// tests/process_runner.rs

#![cfg(unix)]

use hybrid_polisher_test_utils::init_tracing;

use std::error::Error;
use std::time::{Duration, Instant};

use hybrid_polisher::config::ExecutionConfig;
use hybrid_polisher::errors::PolishError;
use hybrid_polisher::exec::{Executor, RealExecutorBackend};
use hybrid_polisher::tools::{PassThroughParams, RaconParams, Tool, ToolKind, ToolSettings, ToolTable};

type TestResult = Result<(), Box<dyn Error>>;

/// Tool table where samtools and racon resolve to shell builtins.
fn shell_tools() -> ToolTable {
    let mut table = ToolTable::default();
    table.set(
        ToolKind::Samtools,
        ToolSettings {
            binary: "sh".to_string(),
            ..ToolSettings::default_for(ToolKind::Samtools)
        },
    );
    table.set(
        ToolKind::Racon,
        ToolSettings {
            binary: "echo".to_string(),
            ..ToolSettings::default_for(ToolKind::Racon)
        },
    );
    table
}

fn executor(execution: ExecutionConfig) -> Executor<RealExecutorBackend> {
    Executor::new(execution, shell_tools(), RealExecutorBackend::new())
}

#[tokio::test]
async fn exit_status_is_reported() -> TestResult {
    init_tracing();

    let mut exec = executor(ExecutionConfig::default());

    let ok = exec
        .run(Tool::Samtools(PassThroughParams::new(["-c", "exit 0"])), Vec::new(), None)
        .await?;
    assert!(ok.success());

    let failed = exec
        .run(Tool::Samtools(PassThroughParams::new(["-c", "exit 3"])), Vec::new(), None)
        .await?;
    assert!(!failed.success());
    assert_eq!(failed.code, Some(3));
    assert_eq!(failed.tool, ToolKind::Samtools);

    Ok(())
}

#[tokio::test]
async fn fail_fast_turns_exit_status_into_error() -> TestResult {
    init_tracing();

    let mut exec = executor(ExecutionConfig {
        fail_fast: true,
        ..ExecutionConfig::default()
    });

    let err = exec
        .run(Tool::Samtools(PassThroughParams::new(["-c", "exit 3"])), Vec::new(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, PolishError::ToolFailed { code: 3, .. }));
    assert_eq!(err.exit_code(), -1);

    Ok(())
}

#[tokio::test]
async fn missing_binary_is_an_error() -> TestResult {
    init_tracing();

    let mut table = ToolTable::default();
    table.set(
        ToolKind::BcfTools,
        ToolSettings {
            binary: "/definitely/not/here/bcftools".to_string(),
            ..ToolSettings::default_for(ToolKind::BcfTools)
        },
    );
    let mut exec = Executor::new(ExecutionConfig::default(), table, RealExecutorBackend::new());

    let err = exec
        .run(Tool::BcfTools(PassThroughParams::new(["view"])), Vec::new(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, PolishError::Other(_)));

    Ok(())
}

#[tokio::test]
async fn racon_stdout_lands_in_output_file() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let output = dir.path().join("racon.fasta");
    let params = RaconParams::new(["/r/a.fq"], "/aln/ovl.sam", "/asm/c.fasta", &output)?;

    let mut exec = executor(ExecutionConfig::default());
    let report = exec
        .run(Tool::Racon(params), vec![output.clone()], None)
        .await?;

    assert!(report.success());
    let written = std::fs::read_to_string(&output)?;
    assert_eq!(written.trim_end(), "/r/a.fq /aln/ovl.sam /asm/c.fasta");

    Ok(())
}

#[tokio::test]
async fn settle_delay_follows_every_tool() -> TestResult {
    init_tracing();

    let mut exec = executor(ExecutionConfig {
        settle: Duration::from_millis(100),
        ..ExecutionConfig::default()
    });

    let started = Instant::now();
    exec.run(Tool::Samtools(PassThroughParams::new(["-c", "true"])), Vec::new(), None)
        .await?;
    exec.run(Tool::Samtools(PassThroughParams::new(["-c", "true"])), Vec::new(), None)
        .await?;

    assert!(started.elapsed() >= Duration::from_millis(200));

    Ok(())
}
