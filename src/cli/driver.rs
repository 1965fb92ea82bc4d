//! Runs one transpilation per input.
//!
//! Inputs are independent: a failure is recorded and the driver moves on to
//! the next input. Only configuration and output-directory problems abort
//! the whole run.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::ffi::OsStr;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use jsvtl_common::NewLineKind;

use super::args::CliArgs;
use super::config::{self, ResolvedOptions};
use crate::transpile_json;

/// Extension of written templates.
pub const TEMPLATE_EXTENSION: &str = "vtl";

const STDIN_NAME: &str = "<stdin>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    pub fn display_name(&self) -> String {
        match self {
            Input::Stdin => STDIN_NAME.to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    /// `<stem>.vtl`, or `stdin.vtl` for standard input.
    pub fn output_file_name(&self) -> PathBuf {
        let stem = match self {
            Input::Stdin => None,
            Input::File(path) => path.file_stem(),
        };
        let mut name = PathBuf::from(stem.unwrap_or(OsStr::new("stdin")));
        name.set_extension(TEMPLATE_EXTENSION);
        name
    }

    fn read(&self, stdin: &mut dyn Read) -> Result<String> {
        match self {
            Input::Stdin => {
                let mut source = String::new();
                stdin
                    .read_to_string(&mut source)
                    .context("failed to read standard input")?;
                Ok(source)
            }
            Input::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
        }
    }
}

/// A rendered template destined for stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub input: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub file: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct RunResult {
    /// Templates to print, in input order. Empty when `--out-dir` is set.
    pub templates: Vec<Template>,
    /// Files written under `--out-dir`.
    pub written: Vec<PathBuf>,
    pub failures: Vec<Failure>,
    /// Line ending the templates were rendered with.
    pub new_line: NewLineKind,
}

impl RunResult {
    pub fn succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn input_count(&self) -> usize {
        self.templates.len() + self.written.len() + self.failures.len()
    }

    /// Write each template followed by the line ending it was rendered with.
    pub fn write_templates(&self, out: &mut dyn Write) -> std::io::Result<()> {
        for template in &self.templates {
            out.write_all(template.text.as_bytes())?;
            out.write_all(self.new_line.as_str().as_bytes())?;
        }
        out.flush()
    }
}

pub fn collect_inputs(args: &CliArgs, cwd: &Path) -> Vec<Input> {
    if args.files.is_empty() {
        return vec![Input::Stdin];
    }
    args.files
        .iter()
        .map(|file| Input::File(cwd.join(file)))
        .collect()
}

pub fn run(args: &CliArgs, cwd: &Path, stdin: &mut dyn Read) -> Result<RunResult> {
    let config = config::find_config(args, cwd)?;
    let resolved = config::resolve_options(args, config.as_ref(), cwd);
    run_with_options(&collect_inputs(args, cwd), &resolved, stdin)
}

#[tracing::instrument(level = "debug", skip_all, fields(inputs = inputs.len()))]
pub fn run_with_options(
    inputs: &[Input],
    options: &ResolvedOptions,
    stdin: &mut dyn Read,
) -> Result<RunResult> {
    if let Some(dir) = &options.out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let mut result = RunResult {
        new_line: options.transpile.new_line,
        ..RunResult::default()
    };
    // Output path -> input that produced it.
    let mut outputs: FxHashMap<PathBuf, String> = FxHashMap::default();
    for input in inputs {
        let name = input.display_name();
        let text = match transpile_input(input, options, stdin) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(input = %name, error = %err, "input failed");
                result.failures.push(Failure {
                    file: name,
                    message: format!("{err:#}"),
                });
                continue;
            }
        };

        match &options.out_dir {
            Some(dir) => {
                let path = dir.join(input.output_file_name());
                if let Some(previous) = outputs.get(&path) {
                    tracing::debug!(input = %name, path = %path.display(), "output collision");
                    result.failures.push(Failure {
                        message: format!(
                            "output {} was already written for {previous}",
                            path.display()
                        ),
                        file: name,
                    });
                    continue;
                }
                std::fs::write(&path, &text)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::debug!(path = %path.display(), "wrote template");
                outputs.insert(path.clone(), name);
                result.written.push(path);
            }
            None => result.templates.push(Template { input: name, text }),
        }
    }
    Ok(result)
}

fn transpile_input(input: &Input, options: &ResolvedOptions, stdin: &mut dyn Read) -> Result<String> {
    let source = input.read(stdin)?;
    Ok(transpile_json(&source, &options.transpile)?)
}
