use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use jsvtl_common::NewLineKind;
use jsvtl_emitter::{SwitchEquality, TranspileOptions};

use super::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "jsvtl.json";

/// Contents of a `jsvtl.json` file. Every key is optional.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JsvtlConfig {
    #[serde(default)]
    pub globals: Option<Vec<String>>,
    #[serde(default)]
    pub switch_equality: Option<SwitchEquality>,
    #[serde(default)]
    pub new_line: Option<NewLineKind>,
}

/// Options after merging the config file with command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ResolvedOptions {
    pub transpile: TranspileOptions,
    pub out_dir: Option<PathBuf>,
}

pub fn parse_config(source: &str) -> Result<JsvtlConfig> {
    serde_json::from_str(source).context("failed to parse jsvtl config")
}

pub fn load_config(path: &Path) -> Result<JsvtlConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&source).with_context(|| format!("in {}", path.display()))
}

/// Load `--config` when given, else `jsvtl.json` in `cwd` if it exists.
pub fn find_config(args: &CliArgs, cwd: &Path) -> Result<Option<JsvtlConfig>> {
    if let Some(path) = &args.config {
        return load_config(&cwd.join(path)).map(Some);
    }
    let default_path = cwd.join(CONFIG_FILE_NAME);
    if default_path.is_file() {
        tracing::debug!(path = %default_path.display(), "using default config");
        return load_config(&default_path).map(Some);
    }
    Ok(None)
}

/// Command-line flags override the config file; globals from both are kept.
pub fn resolve_options(args: &CliArgs, config: Option<&JsvtlConfig>, cwd: &Path) -> ResolvedOptions {
    let config = config.cloned().unwrap_or_default();

    let mut transpile = TranspileOptions::default()
        .with_globals(config.globals.unwrap_or_default())
        .with_globals(args.globals.iter().cloned());
    if let Some(equality) = args.switch_equality.map(Into::into).or(config.switch_equality) {
        transpile = transpile.with_switch_equality(equality);
    }
    if let Some(new_line) = args.new_line.map(Into::into).or(config.new_line) {
        transpile = transpile.with_new_line(new_line);
    }

    ResolvedOptions {
        transpile,
        out_dir: args.out_dir.as_ref().map(|dir| cwd.join(dir)),
    }
}
