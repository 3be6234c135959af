//! Pipeline orchestration.
//!
//! Runs the six stages (discover, script, narrate, images, assemble,
//! upload) in order over a shared project directory, updating the tracking
//! sheet after each one. Every stage is also exposed as a standalone CLI
//! subcommand operating on an existing project directory.

pub mod artifacts;
pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod schedule;
pub mod stages;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use orchestrator::Pipeline;
