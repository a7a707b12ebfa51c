//! Tooling & Integration Layer
//!
//! The `repomod` command line: argument parsing, plan rendering and plan
//! application. The engine itself never writes to disk; `apply` does, and only
//! when asked.

pub mod apply;
pub mod cli;
pub mod format;

pub use apply::{apply_commands, ApplySummary};
pub use cli::{Cli, CliContext, CliOutput, Commands};
