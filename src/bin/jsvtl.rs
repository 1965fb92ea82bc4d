#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use jsvtl::cli::args::CliArgs;
use jsvtl::cli::{driver, reporter::Reporter};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT_FAILED: i32 = 1;

fn main() -> Result<()> {
    // Initialize tracing if JSVTL_LOG or RUST_LOG is set (zero cost otherwise).
    jsvtl::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let result = driver::run(&args, &cwd, &mut std::io::stdin().lock())?;

    result
        .write_templates(&mut std::io::stdout().lock())
        .context("failed to write to stdout")?;

    if result.succeeded() {
        std::process::exit(EXIT_SUCCESS);
    }

    let reporter = Reporter::new(!args.no_color && std::io::stderr().is_terminal());
    eprintln!("{}", reporter.render(&result.failures));
    if result.input_count() > 1 {
        eprintln!(
            "{}",
            reporter.format_summary(result.failures.len(), result.input_count())
        );
    }
    std::process::exit(EXIT_INPUT_FAILED);
}
