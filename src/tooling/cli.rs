//! CLI Tooling
//!
//! Command-line interface for the built-in transforms. Every subcommand runs
//! the engine over one root and prints the resulting plan; `--apply` writes it.

use crate::callbacks::CallbackService;
use crate::command::{ExecutedCommand, ExternalFileCommand};
use crate::config::{ConfigLoader, RepomodConfig};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::overlay::OverlayFileSystem;
use crate::tooling::apply::apply_commands;
use crate::tooling::format::{
    format_apply_summary_text, format_handler_failures, format_plan_json, format_plan_text,
};
use crate::transform::Transform;
use crate::transforms::{Discovery, RemoveTransform, RenameExtensionTransform, ReplaceTransform};
use crate::types::Options;
use clap::{Args, Parser, Subcommand, ValueEnum};
use parking_lot::Mutex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// repomod - stage file transformations in memory, then print or apply them
#[derive(Parser)]
#[command(name = "repomod")]
#[command(about = "Plan and apply codemod-style file transformations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (replaces <ROOT>/repomod.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replace a string in every discovered file
    Replace {
        #[command(flatten)]
        target: TargetArgs,
        /// Text to search for
        #[arg(long)]
        from: String,
        /// Replacement text
        #[arg(long)]
        to: String,
    },
    /// Rename files from one extension to another, keeping their content
    RenameExt {
        #[command(flatten)]
        target: TargetArgs,
        /// Source extension, without the dot
        #[arg(long)]
        from: String,
        /// Target extension, without the dot
        #[arg(long)]
        to: String,
    },
    /// Delete every discovered file
    Remove {
        #[command(flatten)]
        target: TargetArgs,
    },
}

impl Commands {
    pub fn target(&self) -> &TargetArgs {
        match self {
            Commands::Replace { target, .. }
            | Commands::RenameExt { target, .. }
            | Commands::Remove { target } => target,
        }
    }
}

/// Arguments shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Directory (or single file) to transform
    pub root: PathBuf,

    /// Glob pattern relative to ROOT; repeatable, defaults to every file
    #[arg(long)]
    pub include: Vec<String>,

    /// Glob pattern relative to ROOT; excluded directories are skipped whole
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the plan to disk instead of only printing it
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// A file or data handler failure reported during the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Collects recovered handler failures for reporting after the plan
#[derive(Debug, Default)]
pub struct CollectingCallbacks {
    failures: Mutex<Vec<HandlerFailure>>,
}

impl CollectingCallbacks {
    pub fn take(&self) -> Vec<HandlerFailure> {
        std::mem::take(&mut *self.failures.lock())
    }
}

impl CallbackService for CollectingCallbacks {
    fn on_command_executed(&self, command: &ExecutedCommand) {
        debug!(kind = ?command.kind, path = %command.path.display(), "Command executed");
    }

    fn on_error(&self, path: &Path, message: &str) {
        self.failures.lock().push(HandlerFailure {
            path: path.to_path_buf(),
            message: message.to_string(),
        });
    }
}

/// What a subcommand prints: `stdout` for the plan, `stderr` for failures
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Resolved root and configuration for one invocation
pub struct CliContext {
    root: PathBuf,
    config: RepomodConfig,
}

impl CliContext {
    /// Resolve the root and load configuration for it
    ///
    /// The root must exist; it is canonicalized so plan paths are absolute.
    pub fn new(root: &Path, config_path: Option<&Path>) -> Result<Self, EngineError> {
        let root = dunce::canonicalize(root).map_err(|e| EngineError::io(root, e))?;
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&root)?,
        };
        Ok(Self { root, config })
    }

    pub fn with_config(root: PathBuf, config: RepomodConfig) -> Self {
        Self { root, config }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &RepomodConfig {
        &self.config
    }

    fn discovery(&self, target: &TargetArgs) -> Discovery {
        let mut exclude = target.exclude.clone();
        for pattern in &self.config.discovery.exclude {
            if !exclude.contains(pattern) {
                exclude.push(pattern.clone());
            }
        }
        Discovery::new(target.include.clone(), exclude)
    }

    /// Execute a CLI command against the host filesystem
    pub async fn execute(&self, command: &Commands) -> Result<CliOutput, EngineError> {
        let started = Instant::now();
        let target = command.target();
        let discovery = self.discovery(target);

        let (commands, failures) = match command {
            Commands::Replace { from, to, .. } => {
                self.run(ReplaceTransform::new(discovery, from, to)).await?
            }
            Commands::RenameExt { from, to, .. } => {
                self.run(RenameExtensionTransform::new(discovery, from, to))
                    .await?
            }
            Commands::Remove { .. } => self.run(RemoveTransform::new(discovery)).await?,
        };

        let mut output = CliOutput {
            stdout: match target.format {
                OutputFormat::Text => format_plan_text(&self.root, &commands),
                OutputFormat::Json => format_plan_json(&self.root, &commands, &failures)
                    .map_err(|e| EngineError::ConfigError(format!("Failed to encode plan: {}", e)))?,
            },
            stderr: String::new(),
        };
        if target.format == OutputFormat::Text {
            output.stderr = format_handler_failures(&self.root, &failures);
        }

        if target.apply {
            let summary = apply_commands(&commands)?;
            if target.format == OutputFormat::Text {
                output.stdout.push('\n');
                output.stdout.push_str(&format_apply_summary_text(&summary));
            }
            info!(
                written = summary.written,
                deleted = summary.deleted,
                "Plan applied"
            );
        }

        debug!("Command finished in {}ms", started.elapsed().as_millis());
        Ok(output)
    }

    async fn run<T: Transform>(
        &self,
        transform: T,
    ) -> Result<(Vec<ExternalFileCommand>, Vec<HandlerFailure>), EngineError> {
        let callbacks = Arc::new(CollectingCallbacks::default());
        let engine = Engine::new(Arc::new(OverlayFileSystem::host()), transform)
            .with_callbacks(callbacks.clone());
        let commands = engine.execute(&self.root, &Options::new()).await?;
        Ok((commands, callbacks.take()))
    }
}
