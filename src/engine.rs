//! Command Dispatcher and Run Loop
//!
//! Interprets the command algebra depth-first: every command, with all of its
//! descendants, completes before the next sibling starts. A pass dispatches the
//! root command under one state value; the transform's finish decision either
//! ends the run, returning the staged changes, or starts another pass.
//!
//! Failure policy is asymmetric. A failing directory handler aborts the run.
//! A failing file or data handler is reported to the callback service and only
//! its branch is abandoned.

use crate::api::{DataApi, DirectoryApi, FileApi};
use crate::callbacks::{CallbackService, NoopCallbacks};
use crate::command::{Command, CommandKind, ExecutedCommand, ExternalFileCommand, FinishCommand};
use crate::error::EngineError;
use crate::overlay::OverlayFileSystem;
use crate::transform::Transform;
use crate::tree::node::EntryKind;
use crate::types::{Dependencies, Options};
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Engine<T: Transform> {
    overlay: Arc<OverlayFileSystem>,
    transform: T,
    callbacks: Arc<dyn CallbackService>,
    dependencies: Dependencies,
}

impl<T: Transform> Engine<T> {
    pub fn new(overlay: Arc<OverlayFileSystem>, transform: T) -> Self {
        Self {
            overlay,
            transform,
            callbacks: Arc::new(NoopCallbacks),
            dependencies: Dependencies::new(),
        }
    }

    pub fn with_callbacks(mut self, callbacks: Arc<dyn CallbackService>) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Dependencies) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn overlay(&self) -> &OverlayFileSystem {
        &self.overlay
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Run the transform over `root`, starting without state.
    pub async fn execute(
        &self,
        root: &Path,
        options: &Options,
    ) -> Result<Vec<ExternalFileCommand>, EngineError> {
        self.execute_with_state(root, options, None).await
    }

    /// Run passes over `root` until the transform's finish decision is `Noop`
    ///
    /// Returns nothing when `root` is neither a file nor a directory. There is
    /// no bound on the number of passes.
    pub async fn execute_with_state(
        &self,
        root: &Path,
        options: &Options,
        previous: Option<T::State>,
    ) -> Result<Vec<ExternalFileCommand>, EngineError> {
        let mut previous = previous;
        let mut pass = 1usize;

        loop {
            let Some(entry) = self.overlay.classify_entry(root).await else {
                debug!("Root {} is neither a file nor a directory", root.display());
                return Ok(Vec::new());
            };

            let command = match entry.kind() {
                EntryKind::Directory => Command::TraverseDirectory {
                    path: root.to_path_buf(),
                    options: options.clone(),
                },
                EntryKind::File => Command::TraverseFile {
                    path: root.to_path_buf(),
                    options: options.clone(),
                },
            };

            let state = self
                .transform
                .initialize_state(options, previous.take())
                .await
                .map_err(EngineError::InitializeState)?;

            debug!(pass, root = %root.display(), "Starting pass");
            self.dispatch(command, state.as_ref()).await?;

            let finish = self
                .transform
                .handle_finish(options, state.as_ref())
                .await
                .map_err(EngineError::Finish)?;

            match finish {
                FinishCommand::Noop => {
                    let commands = self.overlay.external_file_commands();
                    let stats = self.overlay.stats();
                    info!(
                        passes = pass,
                        commands = commands.len(),
                        entries = stats.entries,
                        "Transform finished"
                    );
                    return Ok(commands);
                }
                FinishCommand::Repeat => {
                    previous = state;
                    pass += 1;
                }
            }
        }
    }

    fn dispatch<'a>(
        &'a self,
        command: Command,
        state: Option<&'a T::State>,
    ) -> BoxFuture<'a, Result<(), EngineError>> {
        async move {
            match command {
                Command::TraverseDirectory { path, options } => {
                    self.traverse_directory(path, options, state).await
                }
                Command::TraverseFile { path, options } => {
                    self.traverse_file(path, options, state).await
                }
                Command::Materialize { path, options } => {
                    self.materialize(path, options, state).await
                }
                Command::Delete { path } => {
                    self.overlay.stage_delete(&path);
                    self.notify(CommandKind::Delete, path);
                    Ok(())
                }
                Command::StageData { path, data } => {
                    self.overlay.stage_write(&path, data);
                    self.notify(CommandKind::StageData, path);
                    Ok(())
                }
                Command::Noop => Ok(()),
            }
        }
        .boxed()
    }

    async fn traverse_directory(
        &self,
        path: PathBuf,
        options: Options,
        state: Option<&T::State>,
    ) -> Result<(), EngineError> {
        let include = self.transform.include_patterns();
        if !include.is_empty() {
            let discovered = self
                .overlay
                .discover(&path, include, self.transform.exclude_patterns())
                .await?;
            debug!(
                "Discovered {} files under {}",
                discovered.len(),
                path.display()
            );
            for file in discovered {
                let command = Command::TraverseFile {
                    path: file,
                    options: options.clone(),
                };
                self.dispatch(command, state).await?;
            }
            self.notify(CommandKind::TraverseDirectory, path.clone());
        }

        if self.overlay.classify_directory(&path).await.is_none() {
            return Ok(());
        }
        if !self.transform.handles_directories() {
            return Ok(());
        }

        let api = DirectoryApi::new(&self.overlay, &self.dependencies);
        let commands = propagate(
            &path,
            self.transform
                .handle_directory(&api, &path, &options, state),
        )
        .await?;

        for command in commands {
            self.dispatch(command.into(), state).await?;
        }

        self.notify(CommandKind::TraverseDirectory, path);
        Ok(())
    }

    async fn traverse_file(
        &self,
        path: PathBuf,
        options: Options,
        state: Option<&T::State>,
    ) -> Result<(), EngineError> {
        if self.overlay.classify_file(&path).await.is_none() {
            return Ok(());
        }

        let api = FileApi::new(&self.overlay, &self.dependencies);
        let handled = self
            .recover(
                &path,
                self.transform.handle_file(&api, &path, &options, state),
            )
            .await;

        if let Some(commands) = handled {
            for command in commands {
                self.dispatch(command.into(), state).await?;
            }
        }

        self.notify(CommandKind::TraverseFile, path);
        Ok(())
    }

    async fn materialize(
        &self,
        path: PathBuf,
        options: Options,
        state: Option<&T::State>,
    ) -> Result<(), EngineError> {
        let data = self.overlay.read_file(&path).await?;

        let api = DataApi::new(&self.dependencies);
        let handled = self
            .recover(
                &path,
                self.transform
                    .handle_data(&api, &path, &data, &options, state),
            )
            .await;

        if let Some(command) = handled {
            self.dispatch(command.into(), state).await?;
        }

        self.notify(CommandKind::Materialize, path);
        Ok(())
    }

    /// Run a file or data handler; a failure is reported and contained.
    async fn recover<R>(
        &self,
        path: &Path,
        handler: impl Future<Output = anyhow::Result<R>>,
    ) -> Option<R> {
        match handler.await {
            Ok(value) => Some(value),
            Err(err) => {
                let message = err.to_string();
                warn!(path = %path.display(), "Abandoning branch after handler failure: {}", message);
                self.callbacks.on_error(path, &message);
                None
            }
        }
    }

    fn notify(&self, kind: CommandKind, path: PathBuf) {
        self.callbacks
            .on_command_executed(&ExecutedCommand { kind, path });
    }
}

/// Run a directory handler; a failure aborts the run.
async fn propagate<R>(
    path: &Path,
    handler: impl Future<Output = anyhow::Result<R>>,
) -> Result<R, EngineError> {
    handler
        .await
        .map_err(|source| EngineError::DirectoryHandler {
            path: path.to_path_buf(),
            source,
        })
}
