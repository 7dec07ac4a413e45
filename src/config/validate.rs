// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{ConfigFile, ExecutionConfig, RawConfigFile, default_container_image};
use crate::errors::{PolishError, Result};
use crate::fs::absolutize;
use crate::tools::{ToolKind, ToolSettings, ToolTable};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::PolishError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_polish(&raw)?;
        let tools = resolve_tools(&raw)?;
        let execution = resolve_execution(&raw)?;
        Ok(ConfigFile::new_unchecked(execution, raw.polish, tools))
    }
}

fn validate_polish(cfg: &RawConfigFile) -> Result<()> {
    let polish = &cfg.polish;

    if polish.max_iter == 0 {
        return Err(PolishError::ConfigError(
            "[polish].max_iter must be >= 1 (got 0)".to_string(),
        ));
    }

    if polish.ram_gb == 0 {
        return Err(PolishError::ConfigError(
            "[polish].ram_gb must be >= 1 (got 0)".to_string(),
        ));
    }

    if polish.prefix.trim().is_empty() {
        return Err(PolishError::ConfigError(
            "[polish].prefix must not be empty".to_string(),
        ));
    }

    if polish.prefix.contains(std::path::MAIN_SEPARATOR) || polish.prefix.contains('/') {
        return Err(PolishError::ConfigError(format!(
            "[polish].prefix '{}' must be a file name prefix, not a path",
            polish.prefix
        )));
    }

    if !polish.mapping_setting.is_mapping() {
        return Err(PolishError::ConfigError(
            "[polish].mapping_setting must be a mapping preset (sr, map-pb or map-ont)"
                .to_string(),
        ));
    }

    if polish.threads == Some(0) {
        return Err(PolishError::ConfigError(
            "[polish].threads must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn resolve_tools(cfg: &RawConfigFile) -> Result<ToolTable> {
    let mut table = ToolTable::default();

    for (name, section) in cfg.tools.iter() {
        let kind: ToolKind = name.parse()?;

        if section.jar.is_some() && kind != ToolKind::Pilon {
            return Err(PolishError::ConfigError(format!(
                "[tools.{name}].jar is only supported for pilon"
            )));
        }

        if !section.extra_args.is_empty()
            && matches!(kind, ToolKind::Samtools | ToolKind::BcfTools)
        {
            return Err(PolishError::ConfigError(format!(
                "[tools.{name}].extra_args is not supported: {name} arguments are passed through verbatim"
            )));
        }

        if let Some(binary) = &section.binary {
            if binary.trim().is_empty() {
                return Err(PolishError::ConfigError(format!(
                    "[tools.{name}].binary must not be empty"
                )));
            }
        }

        let jar = section.jar.as_deref().map(absolutize).transpose()?;

        let defaults = ToolSettings::default_for(kind);
        table.set(
            kind,
            ToolSettings {
                binary: section.binary.clone().unwrap_or(defaults.binary),
                jar: jar.or(defaults.jar),
                extra_args: section.extra_args.clone(),
            },
        );
    }

    Ok(table)
}

fn resolve_execution(cfg: &RawConfigFile) -> Result<ExecutionConfig> {
    let section = &cfg.execution;
    let image = match &section.image {
        Some(path) => absolutize(path)?,
        None => default_container_image(),
    };

    Ok(ExecutionConfig {
        local: section.local,
        image,
        settle: Duration::from_millis(section.settle_ms),
        fail_fast: section.fail_fast,
    })
}
