//! Tracing setup for the `jsvtl` binary.
//!
//! The library crates only emit events; this module installs the subscriber
//! that prints them. What each target reports:
//!
//! | Target | Level | Events |
//! |---|---|---|
//! | `jsvtl_emitter::transform` | `debug` | `transform_program` span (statement and global counts), `lowering switch` (case count), `transpilation rejected` |
//! | `jsvtl_emitter::scope` | `trace` | `registered global`, `declared` (source name, template name, depth), `reserved temporary`, `push scope` / `pop scope` |
//! | `jsvtl_emitter::vtl::render` | `trace` | `printed template` (byte count) |
//! | `jsvtl::cli` | `debug` | `run_with_options` span, `using default config`, `input failed`, `output collision`, `wrote template` |
//!
//! `JSVTL_LOG` (falling back to `RUST_LOG`) is an `EnvFilter` directive;
//! nothing is installed when neither is set. `JSVTL_LOG_FORMAT` picks
//! `text` (default), `tree` (`tracing-tree`, useful for seeing which scope
//! frame a declaration landed in) or `json`.
//!
//! ```bash
//! # Why did `total` become `total_2`?
//! JSVTL_LOG="jsvtl_emitter::scope=trace" JSVTL_LOG_FORMAT=tree jsvtl handler.json
//!
//! # Switch temporaries and rejections, one JSON object per line
//! JSVTL_LOG="jsvtl_emitter::transform=debug" JSVTL_LOG_FORMAT=json jsvtl route.json
//! ```
//!
//! Output goes to stderr; stdout carries only templates.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "JSVTL_LOG";
const LOG_FORMAT_VAR: &str = "JSVTL_LOG_FORMAT";
const RUST_LOG_VAR: &str = "RUST_LOG";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name. Unknown names fall back to `Text`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_VAR).unwrap_or_default())
    }
}

/// The filter directive, `JSVTL_LOG` first, then `RUST_LOG`.
fn filter_directive(var: impl Fn(&str) -> Option<String>) -> Option<String> {
    var(LOG_VAR).or_else(|| var(RUST_LOG_VAR))
}

/// Install the global subscriber when a filter directive is set.
pub fn init_tracing() {
    let Some(directive) = filter_directive(|name| std::env::var(name).ok()) else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(directive);

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let layer = tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Text => {
            let layer = fmt::layer().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
    }
}
