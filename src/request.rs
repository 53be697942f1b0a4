//! Generation requests.
//!
//! A [`GenerationRequest`] carries the orchestration-only options the
//! pipeline acts on (paths, flags, hooks) plus the opaque settings payload it
//! hands to the collaborators untouched. Requests deserialize from TOML or
//! JSON: the named keys below are orchestration options, every other key
//! lands in [`settings`](GenerationRequest::settings).

use crate::hooks::HookSet;
use crate::settings::Settings;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    /// Source image. Required.
    #[serde(default)]
    pub source: PathBuf,
    /// Directory the favicon files are written into. Required.
    #[serde(default)]
    pub output_dir: PathBuf,
    /// File the `<link>`/`<meta>` markup is written to.
    #[serde(default)]
    pub html_output: Option<PathBuf>,
    /// Skip the files phase when `output_dir` already exists.
    #[serde(default = "default_skip_if_exists")]
    pub skip_if_exists: bool,
    /// Copy `favicon.ico` into `root_dir` after writing.
    #[serde(default)]
    pub copy_ico_to_root: bool,
    /// Destination of the `favicon.ico` copy.
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
    /// Everything else, forwarded verbatim to the collaborators.
    #[serde(flatten)]
    pub settings: Settings,
    #[serde(skip)]
    pub hooks: HookSet,
}

fn default_skip_if_exists() -> bool {
    true
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            output_dir: PathBuf::new(),
            html_output: None,
            skip_if_exists: default_skip_if_exists(),
            copy_ico_to_root: false,
            root_dir: None,
            settings: Settings::new(),
            hooks: HookSet::default(),
        }
    }
}

impl GenerationRequest {
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn html_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.html_output = Some(path.into());
        self
    }

    pub fn skip_if_exists(mut self, skip: bool) -> Self {
        self.skip_if_exists = skip;
        self
    }

    /// Enable the `favicon.ico` root copy into `root_dir`.
    pub fn copy_ico_to(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.copy_ico_to_root = true;
        self.root_dir = Some(root_dir.into());
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn hooks(mut self, hooks: HookSet) -> Self {
        self.hooks = hooks;
        self
    }

    /// Same request with every path rebased onto `base`.
    ///
    /// Relative paths are joined to `base` and lexically normalized; absolute
    /// paths only get normalized. Empty paths stay empty so validation still
    /// reports them as missing.
    pub fn resolved_against(mut self, base: &Path) -> Self {
        self.source = resolve_path(base, &self.source);
        self.output_dir = resolve_path(base, &self.output_dir);
        self.root_dir = self.root_dir.map(|p| resolve_path(base, &p));
        self.html_output = self.html_output.map(|p| resolve_path(base, &p));
        self
    }
}

/// Join `path` onto `base` and fold `.` and `..` components.
///
/// Lexical only: symlinks are not followed and nothing is read from disk.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    use std::path::Component;

    if path.as_os_str().is_empty() {
        return PathBuf::new();
    }
    let joined = base.join(path);
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Never climb above the root or a prefix
                if matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) {
                    out.pop();
                } else if !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
