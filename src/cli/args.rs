use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use jsvtl_common::NewLineKind;
use jsvtl_emitter::SwitchEquality;

/// CLI arguments for the jsvtl binary.
#[derive(Parser, Debug)]
#[command(
    name = "jsvtl",
    version,
    about = "Transpile a JavaScript subset (as ESTree JSON) into Velocity Template Language"
)]
pub struct CliArgs {
    /// ESTree JSON files to transpile. Reads stdin when none are given.
    pub files: Vec<PathBuf>,

    /// Names the template host provides, e.g. `ctx` or `util`.
    /// May be repeated or comma-separated.
    #[arg(short = 'g', long = "global", value_delimiter = ',')]
    pub globals: Vec<String>,

    /// Path to a jsvtl.json file. Defaults to ./jsvtl.json when present.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write each template to `<dir>/<stem>.vtl` instead of stdout.
    #[arg(long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// Line ending of the rendered templates.
    #[arg(long = "new-line", alias = "newLine", value_enum, ignore_case = true)]
    pub new_line: Option<NewLine>,

    /// Equality operator used for `switch` case tests.
    #[arg(
        long = "switch-equality",
        alias = "switchEquality",
        value_enum,
        ignore_case = true
    )]
    pub switch_equality: Option<Equality>,

    /// Disable colored diagnostics.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NewLine {
    Lf,
    Crlf,
}

impl From<NewLine> for NewLineKind {
    fn from(value: NewLine) -> Self {
        match value {
            NewLine::Lf => Self::Lf,
            NewLine::Crlf => Self::Crlf,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Equality {
    /// `==`
    Loose,
    /// `===`
    Strict,
}

impl From<Equality> for SwitchEquality {
    fn from(value: Equality) -> Self {
        match value {
            Equality::Loose => Self::Loose,
            Equality::Strict => Self::Strict,
        }
    }
}
