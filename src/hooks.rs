//! Lifecycle hooks.
//!
//! A [`HookSet`] is a fixed record of optional callbacks fired synchronously
//! at defined points of the pipeline:
//!
//! | Hook | Fired | Argument |
//! |---|---|---|
//! | `on_start` | after validation, before any I/O | none |
//! | `on_skip_files` | output directory exists and skipping is on | output directory |
//! | `on_file_written` | after each generated file is written | file path |
//! | `on_ico_copied` | after `favicon.ico` is copied to the root | copied file path |
//! | `on_html_written` | after the HTML fragment file is written | HTML path |
//!
//! An empty slot is a no-op. A hook returning `Err` aborts the pipeline at
//! that point; hooks already fired stay fired.
//!
//! `on_file_written` is called from the parallel write workers, so every
//! callback must be `Send + Sync`.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
#[error("Hook '{hook}' failed: {message}")]
pub struct HookError {
    pub hook: &'static str,
    pub message: String,
}

impl HookError {
    pub fn new(hook: &'static str, message: impl Into<String>) -> Self {
        Self {
            hook,
            message: message.into(),
        }
    }
}

/// Result every hook callback returns.
pub type HookResult = Result<(), HookError>;

type StartHook = Arc<dyn Fn() -> HookResult + Send + Sync>;
type PathHook = Arc<dyn Fn(&Path) -> HookResult + Send + Sync>;

/// Optional lifecycle callbacks. Cheap to clone: slots are shared.
#[derive(Clone, Default)]
pub struct HookSet {
    on_start: Option<StartHook>,
    on_skip_files: Option<PathHook>,
    on_file_written: Option<PathHook>,
    on_html_written: Option<PathHook>,
    on_ico_copied: Option<PathHook>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every slot filled with an `info!` event, for builds that want a
    /// progress log without writing their own callbacks.
    pub fn logging() -> Self {
        Self::new()
            .on_start(|| {
                info!("favicon generation started");
                Ok(())
            })
            .on_skip_files(|dir| {
                info!(output_dir = %dir.display(), "output directory exists; skipping files");
                Ok(())
            })
            .on_file_written(|path| {
                info!(path = %path.display(), "favicon file written");
                Ok(())
            })
            .on_html_written(|path| {
                info!(path = %path.display(), "favicon markup written");
                Ok(())
            })
            .on_ico_copied(|path| {
                info!(path = %path.display(), "favicon.ico copied to root");
                Ok(())
            })
    }

    pub fn on_start(mut self, hook: impl Fn() -> HookResult + Send + Sync + 'static) -> Self {
        self.on_start = Some(Arc::new(hook));
        self
    }

    pub fn on_skip_files(
        mut self,
        hook: impl Fn(&Path) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.on_skip_files = Some(Arc::new(hook));
        self
    }

    pub fn on_file_written(
        mut self,
        hook: impl Fn(&Path) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.on_file_written = Some(Arc::new(hook));
        self
    }

    pub fn on_html_written(
        mut self,
        hook: impl Fn(&Path) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.on_html_written = Some(Arc::new(hook));
        self
    }

    pub fn on_ico_copied(
        mut self,
        hook: impl Fn(&Path) -> HookResult + Send + Sync + 'static,
    ) -> Self {
        self.on_ico_copied = Some(Arc::new(hook));
        self
    }

    pub(crate) fn start(&self) -> HookResult {
        self.on_start.as_ref().map_or(Ok(()), |hook| hook())
    }

    pub(crate) fn skip_files(&self, output_dir: &Path) -> HookResult {
        fire(&self.on_skip_files, output_dir)
    }

    pub(crate) fn file_written(&self, path: &Path) -> HookResult {
        fire(&self.on_file_written, path)
    }

    pub(crate) fn html_written(&self, path: &Path) -> HookResult {
        fire(&self.on_html_written, path)
    }

    pub(crate) fn ico_copied(&self, path: &Path) -> HookResult {
        fire(&self.on_ico_copied, path)
    }
}

fn fire(slot: &Option<PathHook>, path: &Path) -> HookResult {
    slot.as_ref().map_or(Ok(()), |hook| hook(path))
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSet")
            .field("on_start", &self.on_start.is_some())
            .field("on_skip_files", &self.on_skip_files.is_some())
            .field("on_file_written", &self.on_file_written.is_some())
            .field("on_html_written", &self.on_html_written.is_some())
            .field("on_ico_copied", &self.on_ico_copied.is_some())
            .finish()
    }
}
