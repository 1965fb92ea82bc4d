//! Common types and utilities for the jsvtl transpiler.
//!
//! This crate provides foundational types used across all jsvtl crates:
//! - Line-ending policy (`NewLineKind`)
//! - User-facing source positions (`Position`)

// Line-ending policy shared by the printer and the CLI config
pub mod common;
pub use common::NewLineKind;

// Position types for line/column source locations
pub mod position;
pub use position::Position;
