//! Common types and utilities for the tsz module transforms.
//!
//! This crate provides foundational types used across all tsz crates:
//! - Common enums (`ModuleKind`, `ScriptTarget`, `JsxEmit`, `ScriptKind`)
//! - Resolved compiler options with TypeScript's derived defaults
//! - File-name and module-specifier helpers
//! - Limits and thresholds

// Shared compiler enums
pub mod common;
pub use common::{
    JsxEmit, ModuleDetectionKind, ModuleKind, PackageJsonType, ScriptKind, ScriptTarget,
};

// Compiler options consumed by the transforms
pub mod options;
pub use options::CompilerOptions;

// Path and module specifier helpers
pub mod path;

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod options_tests;
