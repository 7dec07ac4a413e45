// tests/cli_usage.rs

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

fn polisher(args: &[&str], cwd: &Path) -> Output {
    polisher_logging(args, cwd, "error")
}

fn polisher_logging(args: &[&str], cwd: &Path, level: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hybrid-polisher"))
        .args(args)
        .current_dir(cwd)
        .env("HYBRID_POLISHER_LOG", level)
        .output()
        .expect("failed to spawn hybrid-polisher")
}

#[test]
fn no_arguments_prints_usage_and_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let out = polisher(&[], dir.path());

    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Usage"), "stdout was: {stdout}");
    assert!(stdout.contains("--contigs"));
}

#[test]
fn dry_run_prints_commands_without_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let out_dir_str = out_dir.to_string_lossy().into_owned();

    let out = polisher_logging(
        &[
            "--dry-run",
            "-c",
            "/data/contigs.fasta",
            "-r",
            "/data/r1.fq",
            "/data/r2.fq",
            "-m",
            "2",
            "-p",
            "run1",
            "-o",
            &out_dir_str,
        ],
        dir.path(),
        "debug",
    );

    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 12, "stdout was: {stdout}");
    assert!(lines.iter().all(|l| l.starts_with('[')), "logs leaked to stdout: {stdout}");
    assert!(!out.stderr.is_empty());
    assert!(lines[0].starts_with("[1] minimap2 -d "));
    assert!(lines[5].contains("-jar /usr/bin/pilon.jar --genome /data/contigs.fasta"));
    assert!(lines[11].contains(&format!("--output run1_1 --outdir {out_dir_str}")));
    assert!(!out_dir.exists());
}

#[test]
fn unknown_tool_in_config_exits_with_fatal_status() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[tools.bwa]\nbinary = \"bwa\"").unwrap();
    let config_path = config.path().to_string_lossy().into_owned();

    let out = polisher(
        &["--config", &config_path, "-c", "c.fasta", "-r", "r1.fq"],
        dir.path(),
    );

    #[cfg(unix)]
    assert_eq!(out.status.code(), Some(255));
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Program bwa is not implemented."), "stderr: {stderr}");
}

#[test]
fn missing_contigs_and_long_reads_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = polisher(&["-r", "r1.fq", "--dry-run"], dir.path());

    #[cfg(unix)]
    assert_eq!(out.status.code(), Some(255));
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("no contigs given"));
}

#[test]
fn invalid_long_read_mode_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = polisher(
        &["--long-reads", "ont.fq", "--long-read-mode", "illumina"],
        dir.path(),
    );

    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid long read mode"));
}
