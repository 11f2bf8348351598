//! Command-line support for the `tsz-modules` binary.
//!
//! - `args` - clap definitions for the command line
//! - `config` - `tsconfig.json` loading (JSONC, `extends`) and option resolution
//! - `driver` - reads JSON-encoded source files, runs module emit, writes output
//! - `tracing_config` - opt-in tracing subscriber

pub mod args;
pub mod config;
pub mod driver;
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;
