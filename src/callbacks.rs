//! Progress and error reporting out of the dispatcher.

use crate::command::ExecutedCommand;
use std::path::Path;
use tracing::{debug, warn};

/// Receives progress and recovered handler failures
///
/// Both methods default to doing nothing, so implementors override only what
/// they observe.
pub trait CallbackService: Send + Sync {
    fn on_command_executed(&self, _command: &ExecutedCommand) {}

    /// A file or data handler failed; its branch was abandoned.
    fn on_error(&self, _path: &Path, _message: &str) {}
}

/// Ignores every callback
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCallbacks;

impl CallbackService for NoopCallbacks {}

/// Forwards callbacks to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingCallbacks;

impl CallbackService for TracingCallbacks {
    fn on_command_executed(&self, command: &ExecutedCommand) {
        debug!(kind = ?command.kind, path = %command.path.display(), "Command executed");
    }

    fn on_error(&self, path: &Path, message: &str) {
        warn!(path = %path.display(), "Handler failed: {}", message);
    }
}
