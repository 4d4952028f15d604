// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::app::model::EngineType;

const APP_DIR_NAME: &str = "gridgate";
const CONFIG_FILE_NAME: &str = "gridgate.toml";
const CONFIG_ENV_VAR: &str = "GRIDGATE_CONFIG_PATH";
const DEFAULT_MASTER_HOST: &str = "localhost";
const DEFAULT_MASTER_PORT: u16 = 6444;

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    engine: Option<String>,
    template_dir: Option<String>,
    master_host: Option<String>,
    master_port: Option<u16>,
    verbose: Option<bool>,
}

#[derive(Debug)]
pub struct Config {
    pub engine: EngineType,
    /// Directory command templates are loaded from when it exists;
    /// otherwise the embedded set is used.
    pub template_dir: Option<PathBuf>,
    pub master_host: String,
    pub master_port: u16,
    pub verbose: bool,
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Override,
    Env,
    ConfigFile,
    Default,
}

impl ConfigSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigSource::Override => "override",
            ConfigSource::Env => "env",
            ConfigSource::ConfigFile => "config",
            ConfigSource::Default => "default",
        }
    }
}

#[derive(Debug)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

#[derive(Debug)]
pub struct ConfigReport {
    pub config_path: Option<PathBuf>,
    pub config_path_source: Option<ConfigSource>,
    pub config_file_present: bool,
    pub engine: ConfigValue<EngineType>,
    pub template_dir: ConfigValue<Option<PathBuf>>,
    pub master_host: ConfigValue<String>,
    pub master_port: ConfigValue<u16>,
    pub verbose: ConfigValue<bool>,
}

#[derive(Debug)]
pub struct LoadResult {
    pub config: Config,
    pub report: ConfigReport,
}

#[derive(Debug, Default)]
pub struct Overrides {
    pub engine: Option<EngineType>,
    pub template_dir: Option<PathBuf>,
    pub master_host: Option<String>,
    pub master_port: Option<u16>,
    pub verbose: Option<bool>,
}

pub fn load(config_path_override: Option<PathBuf>, overrides: Overrides) -> Result<Config> {
    Ok(load_with_report(config_path_override, overrides)?.config)
}

pub fn load_with_report(
    config_path_override: Option<PathBuf>,
    overrides: Overrides,
) -> Result<LoadResult> {
    let (config_path, config_path_source, required) = match config_path_override {
        Some(path) => (Some(expand_path(path)), Some(ConfigSource::Override), true),
        None => match config_path_from_env()? {
            Some(path) => (Some(expand_path(path)), Some(ConfigSource::Env), true),
            None => match default_config_path().ok() {
                Some(path) => (Some(path), Some(ConfigSource::Default), false),
                None => (None, None, false),
            },
        },
    };
    let config_file_present = config_path
        .as_deref()
        .map(|path| path.exists())
        .unwrap_or(false);

    let file_config = match config_path.as_deref() {
        Some(path) => read_config_file(path, required)?,
        None => FileConfig::default(),
    };

    let (engine, engine_source) = match overrides.engine {
        Some(engine) => (engine, ConfigSource::Override),
        None => match file_config.engine {
            Some(raw) => (
                raw.parse::<EngineType>()
                    .with_context(|| format!("invalid engine in config file: '{raw}'"))?,
                ConfigSource::ConfigFile,
            ),
            None => (EngineType::GridEngine, ConfigSource::Default),
        },
    };

    let (template_dir, template_source) = match overrides.template_dir {
        Some(dir) => (Some(expand_path(dir)), ConfigSource::Override),
        None => match file_config.template_dir {
            Some(raw) => (
                Some(resolve_path(
                    &raw,
                    config_path.as_deref().and_then(|path| path.parent()),
                )),
                ConfigSource::ConfigFile,
            ),
            None => (None, ConfigSource::Default),
        },
    };

    let (master_host, master_host_source) = match overrides.master_host {
        Some(host) => (host, ConfigSource::Override),
        None => match file_config.master_host {
            Some(host) => (host, ConfigSource::ConfigFile),
            None => (DEFAULT_MASTER_HOST.to_string(), ConfigSource::Default),
        },
    };

    let (master_port, master_port_source) = match overrides.master_port {
        Some(port) => (port, ConfigSource::Override),
        None => match file_config.master_port {
            Some(port) => (port, ConfigSource::ConfigFile),
            None => (DEFAULT_MASTER_PORT, ConfigSource::Default),
        },
    };
    if master_port == 0 {
        anyhow::bail!("master_port must be between 1 and 65535");
    }

    let (verbose, verbose_source) = match overrides.verbose {
        Some(verbose) => (verbose, ConfigSource::Override),
        None => match file_config.verbose {
            Some(verbose) => (verbose, ConfigSource::ConfigFile),
            None => (false, ConfigSource::Default),
        },
    };

    let config = Config {
        engine,
        template_dir,
        master_host,
        master_port,
        verbose,
        config_path: config_path.clone(),
    };

    let report = ConfigReport {
        config_path,
        config_path_source,
        config_file_present,
        engine: ConfigValue {
            value: config.engine,
            source: engine_source,
        },
        template_dir: ConfigValue {
            value: config.template_dir.clone(),
            source: template_source,
        },
        master_host: ConfigValue {
            value: config.master_host.clone(),
            source: master_host_source,
        },
        master_port: ConfigValue {
            value: config.master_port,
            source: master_port_source,
        },
        verbose: ConfigValue {
            value: config.verbose,
            source: verbose_source,
        },
    };

    Ok(LoadResult { config, report })
}

fn read_config_file(path: &Path, required: bool) -> Result<FileConfig> {
    if !path.exists() {
        if required {
            anyhow::bail!("config file not found at {}", path.display());
        }
        return Ok(FileConfig::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn resolve_path(raw: &str, base_dir: Option<&Path>) -> PathBuf {
    let expanded = shellexpand::tilde(raw);
    let path = PathBuf::from(expanded.as_ref());
    if path.is_absolute() {
        return path;
    }
    match base_dir {
        Some(dir) => dir.join(path),
        None => path,
    }
}

fn expand_path(path: PathBuf) -> PathBuf {
    let path_string = path.to_string_lossy().to_string();
    let expanded = shellexpand::tilde(&path_string);
    PathBuf::from(expanded.as_ref())
}

fn config_path_from_env() -> Result<Option<PathBuf>> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(value) => {
            if value.is_empty() {
                anyhow::bail!("{CONFIG_ENV_VAR} is set but empty");
            }
            Ok(Some(PathBuf::from(value)))
        }
        None => Ok(None),
    }
}

fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("failed to resolve config directory")?;
    Ok(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_optional_config_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("missing.toml");
        let cfg = read_config_file(&config_path, false).unwrap();
        assert!(cfg.engine.is_none());
        assert!(cfg.template_dir.is_none());
    }

    #[test]
    fn missing_required_config_file_errors() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("missing.toml");
        let err = read_config_file(&config_path, true).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn file_values_fill_in_and_defaults_cover_the_rest() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &config_path,
            "engine = \"slurm\"\ntemplate_dir = \"templates\"\n",
        )
        .unwrap();

        let LoadResult { config, report } =
            load_with_report(Some(config_path.clone()), Overrides::default()).unwrap();
        assert_eq!(report.config_path_source, Some(ConfigSource::Override));
        assert_eq!(config.engine, EngineType::Slurm);
        // Relative paths resolve against the config file directory.
        assert_eq!(
            config.template_dir.as_deref(),
            Some(dir.path().join("templates").as_path())
        );
        assert_eq!(config.master_host, DEFAULT_MASTER_HOST);
        assert_eq!(config.master_port, DEFAULT_MASTER_PORT);
        assert_eq!(report.engine.source, ConfigSource::ConfigFile);
        assert_eq!(report.master_port.source, ConfigSource::Default);
    }

    #[test]
    fn overrides_take_precedence_over_file_values() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "engine = \"slurm\"\nmaster_port = 7000\n").unwrap();

        let LoadResult { config, report } = load_with_report(
            Some(config_path),
            Overrides {
                engine: Some(EngineType::GridEngine),
                master_port: Some(6445),
                ..Overrides::default()
            },
        )
        .unwrap();
        assert_eq!(config.engine, EngineType::GridEngine);
        assert_eq!(config.master_port, 6445);
        assert_eq!(report.engine.source, ConfigSource::Override);
    }

    #[test]
    fn env_var_supplies_the_config_path() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "engine = \"slurm\"\n").unwrap();

        std::env::set_var(CONFIG_ENV_VAR, &config_path);
        let loaded = load_with_report(None, Overrides::default());
        std::env::remove_var(CONFIG_ENV_VAR);

        let LoadResult { config, report } = loaded.unwrap();
        assert_eq!(config.engine, EngineType::Slurm);
        assert_eq!(report.config_path_source, Some(ConfigSource::Env));
        assert_eq!(config.config_path.as_deref(), Some(config_path.as_path()));
    }

    #[test]
    fn unknown_engine_in_the_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "engine = \"pbs\"\n").unwrap();

        let err = load(Some(config_path), Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("invalid engine"));
    }

    #[test]
    fn zero_master_port_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "master_port = 0\n").unwrap();

        let err = load(Some(config_path), Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("master_port"));
    }
}
