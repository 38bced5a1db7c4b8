//! Compiles physics prefab models into add-on files.
//!
//! See [`run`] for the order a run goes through. The binary in `main.rs` is a
//! thin wrapper that resolves the project root and configuration.

mod config;
mod discover;
mod pipeline;

pub use config::{CONFIG_FILE, Config, ConfigError, TemplatePaths};
pub use discover::discover_sources;
pub use pipeline::{CompileError, RunMode, RunReport, run};
