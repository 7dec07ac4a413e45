// tests/config_loading.rs

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use tempfile::NamedTempFile;

use hybrid_polisher::cli::CliArgs;
use hybrid_polisher::config::model::{CONTAINER_IMAGE_NAME, DEFAULT_MAX_ITER, DEFAULT_RAM_GB};
use hybrid_polisher::config::{ConfigFile, ToolSection, load_and_validate, load_from_path};
use hybrid_polisher::errors::PolishError;
use hybrid_polisher::tools::{PilonParams, Tool, ToolKind};
use hybrid_polisher::types::{FlyeMode, Minimap2Setting};
use hybrid_polisher::apply_cli_overrides;
use hybrid_polisher_test_utils::builders::ConfigFileBuilder;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn empty_file_yields_defaults() {
    let file = config_file("");
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.polish.max_iter, DEFAULT_MAX_ITER);
    assert_eq!(cfg.polish.max_iter, 4);
    assert_eq!(cfg.polish.ram_gb, DEFAULT_RAM_GB);
    assert_eq!(cfg.polish.prefix, "pilon");
    assert_eq!(cfg.polish.mapping_setting, Minimap2Setting::MapIllumina);
    assert_eq!(cfg.polish.long_read_mode, FlyeMode::NanoHq);
    assert!(cfg.execution.local);
    assert!(!cfg.execution.fail_fast);
    assert_eq!(cfg.execution.settle, Duration::ZERO);
    assert!(cfg.execution.image.ends_with(CONTAINER_IMAGE_NAME));
    assert_eq!(cfg.tools.get(ToolKind::Pilon).binary, "java");
    assert_eq!(
        cfg.tools.get(ToolKind::Pilon).jar.as_deref(),
        Some(Path::new("/usr/bin/pilon.jar"))
    );
}

#[test]
fn full_config_is_resolved() {
    let file = config_file(
        r#"
[execution]
local = false
image = "/opt/images/HybridPolisher.sif"
settle_ms = 250
fail_fast = true

[polish]
max_iter = 2
ram_gb = 32
prefix = "sample1"
mapping_setting = "map-ont"
long_read_mode = "pacbio-hifi"
threads = 16

[tools.pilon]
jar = "/opt/pilon/pilon-1.24.jar"
extra_args = ["--fix", "bases"]

[tools.Minimap2]
binary = "/opt/bin/minimap2"
"#,
    );
    let cfg = load_and_validate(file.path()).unwrap();

    assert!(!cfg.execution.local);
    assert!(cfg.execution.fail_fast);
    assert_eq!(cfg.execution.settle, Duration::from_millis(250));
    assert_eq!(
        cfg.execution.image,
        PathBuf::from("/opt/images/HybridPolisher.sif")
    );
    assert_eq!(cfg.polish.max_iter, 2);
    assert_eq!(cfg.polish.ram_gb, 32);
    assert_eq!(cfg.polish.prefix, "sample1");
    assert_eq!(cfg.polish.mapping_setting, Minimap2Setting::MapOnt);
    assert_eq!(cfg.polish.long_read_mode, FlyeMode::PacbioHifi);
    assert_eq!(cfg.polish.threads, Some(16));

    let pilon = cfg.tools.get(ToolKind::Pilon);
    assert_eq!(pilon.binary, "java");
    assert_eq!(pilon.jar.as_deref(), Some(Path::new("/opt/pilon/pilon-1.24.jar")));
    assert_eq!(pilon.extra_args, vec!["--fix", "bases"]);
    assert_eq!(cfg.tools.get(ToolKind::Minimap2).binary, "/opt/bin/minimap2");
    assert_eq!(cfg.tools.get(ToolKind::Samtools).binary, "samtools");
}

#[test]
fn relative_pilon_jar_is_made_absolute() {
    let file = config_file("[tools.pilon]\njar = \"tools/pilon.jar\"\n");
    let cfg = load_and_validate(file.path()).unwrap();
    let cwd = std::env::current_dir().unwrap();

    let jar = cfg.tools.get(ToolKind::Pilon).jar.unwrap();
    assert_eq!(jar, cwd.join("tools/pilon.jar"));

    let params = PilonParams::new("/a/c.fasta", "/a/x.bam", "p", "/out", 4).unwrap();
    let invocation = Tool::Pilon(params).build_invocation(&cfg.tools);
    let argv = invocation.args();
    assert_eq!(argv[2], "-jar");
    assert!(Path::new(&argv[3]).is_absolute(), "jar token not absolute: {}", argv[3]);
    assert_eq!(PathBuf::from(&argv[3]), cwd.join("tools/pilon.jar"));
}

#[test]
fn unknown_tool_section_is_not_implemented() {
    let file = config_file(
        r#"
[tools.bwa]
binary = "bwa"
"#,
    );

    match load_and_validate(file.path()) {
        Err(err @ PolishError::ToolNotImplemented(_)) => {
            assert!(err.to_string().contains("bwa"));
            assert_eq!(err.exit_code(), -1);
        }
        Err(e) => panic!("Expected ToolNotImplemented, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn zero_iterations_are_rejected() {
    let file = config_file("[polish]\nmax_iter = 0\n");

    match load_and_validate(file.path()) {
        Err(PolishError::ConfigError(msg)) => assert!(msg.contains("max_iter")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn index_setting_is_not_a_mapping_preset() {
    let file = config_file("[polish]\nmapping_setting = \"index\"\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(PolishError::ConfigError(_))
    ));
}

#[test]
fn prefix_must_not_be_a_path() {
    let raw = ConfigFileBuilder::new().prefix("runs/run1").raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(PolishError::ConfigError(_))
    ));
}

#[test]
fn builder_values_survive_validation() {
    let cfg = ConfigFileBuilder::new()
        .local(false)
        .image("images/./HybridPolisher.sif")
        .ram_gb(16)
        .build();
    let cwd = std::env::current_dir().unwrap();

    assert!(!cfg.execution.local);
    assert_eq!(cfg.execution.image, cwd.join("images/HybridPolisher.sif"));
    assert_eq!(cfg.polish.ram_gb, 16);
}

#[test]
fn passthrough_tools_reject_extra_args() {
    let raw = ConfigFileBuilder::new()
        .with_tool(
            "samtools",
            ToolSection {
                binary: None,
                jar: None,
                extra_args: vec!["-@".to_string(), "4".to_string()],
            },
        )
        .raw();

    match ConfigFile::try_from(raw) {
        Err(PolishError::ConfigError(msg)) => assert!(msg.contains("passed through verbatim")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn jar_is_only_valid_for_pilon() {
    let raw = ConfigFileBuilder::new()
        .with_tool(
            "flye",
            ToolSection {
                jar: Some("/opt/flye.jar".to_string()),
                ..ToolSection::default()
            },
        )
        .raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(PolishError::ConfigError(_))
    ));
}

#[test]
fn invalid_long_read_mode_fails_to_parse() {
    let file = config_file("[polish]\nlong_read_mode = \"illumina\"\n");
    assert!(matches!(
        load_from_path(file.path()),
        Err(PolishError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_and_validate("/definitely/not/here/polisher.toml").unwrap_err();
    assert!(matches!(err, PolishError::IoError(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn cli_flags_override_config_values() {
    let file = config_file("[polish]\nmax_iter = 7\nprefix = \"from_file\"\nram_gb = 8\n");
    let mut raw = load_from_path(file.path()).unwrap();

    let args = CliArgs::try_parse_from([
        "hybrid-polisher",
        "-c",
        "ref.fasta",
        "-r",
        "r1.fq",
        "r2.fq",
        "-m",
        "2",
        "-p",
        "run1",
        "--long-read-mode",
        "pacbio-raw",
    ])
    .unwrap();
    apply_cli_overrides(&mut raw, &args);
    let cfg = ConfigFile::try_from(raw).unwrap();

    assert_eq!(args.reads, vec![PathBuf::from("r1.fq"), PathBuf::from("r2.fq")]);
    assert_eq!(args.contigs, Some(PathBuf::from("ref.fasta")));
    assert_eq!(cfg.polish.max_iter, 2);
    assert_eq!(cfg.polish.prefix, "run1");
    assert_eq!(cfg.polish.ram_gb, 8);
    assert_eq!(cfg.polish.long_read_mode, FlyeMode::PacbioRaw);
}

#[test]
fn cli_rejects_unknown_long_read_mode() {
    let result = CliArgs::try_parse_from(["hybrid-polisher", "--long-read-mode", "illumina"]);
    assert!(result.is_err());
}
