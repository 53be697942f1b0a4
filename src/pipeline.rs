//! The favicon persistence pipeline.
//!
//! ## Steps
//!
//! ```text
//!  1. validate        source, output_dir, root_dir-if-copying   (no I/O, no hooks)
//!  2. on_start
//!  3. idempotency     output_dir exists && skip_if_exists → on_skip_files, jump to 9
//!  4. mkdir -p        output_dir
//!  5. normalize       backend: source → MasterIcon
//!  6. generate        backend: MasterIcon + settings → FileSet
//!  7. write           all files in parallel, on_file_written per file
//!  8. copy ico        output_dir/favicon.ico → root_dir/favicon.ico, on_ico_copied
//!  9. markup          backend: settings → fragments   (always runs)
//! 10. write markup    html_output if set, on_html_written
//! ```
//!
//! Any error aborts the remaining steps. Nothing is rolled back: files
//! written before a failure stay on disk, and since only the directory's
//! existence gates step 4–8, a retry with `skip_if_exists` will skip them.
//!
//! ## Parallel Writes
//!
//! Step 7 fans out over [rayon](https://docs.rs/rayon). The first failing
//! write (or hook) is returned; writes already in flight may still land.

use crate::hooks::HookError;
use crate::icon::{BackendError, FaviconBackend, FileContent, StandardBackend};
use crate::request::GenerationRequest;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Name of the file copied to the root directory.
pub const ROOT_ICO: &str = "favicon.ico";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Missing required option: {0}")]
    MissingOption(&'static str),
    #[error("copy_ico_to_root is set but root_dir is missing")]
    MissingRootDir,
    #[error("Could not load or convert source image {path}: {source}")]
    Normalize {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("Favicon generation failed: {0}")]
    Generate(#[source] BackendError),
    #[error("Markup generation failed: {0}")]
    Markup(#[source] BackendError),
    #[error("Generated file name escapes the output directory: {0}")]
    InvalidFileName(String),
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Hook(#[from] HookError),
}

trait IoContext<T> {
    fn at(self, path: &Path) -> Result<T, PipelineError>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T, PipelineError> {
        self.map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// What the pipeline needs after validation.
struct Plan<'a> {
    source: &'a Path,
    output_dir: &'a Path,
    ico_root: Option<&'a Path>,
    html_output: Option<&'a Path>,
}

fn validate(request: &GenerationRequest) -> Result<Plan<'_>, PipelineError> {
    if request.source.as_os_str().is_empty() {
        return Err(PipelineError::MissingOption("source"));
    }
    if request.output_dir.as_os_str().is_empty() {
        return Err(PipelineError::MissingOption("output_dir"));
    }
    let ico_root = if request.copy_ico_to_root {
        match request.root_dir.as_deref() {
            Some(root) if !root.as_os_str().is_empty() => Some(root),
            _ => return Err(PipelineError::MissingRootDir),
        }
    } else {
        None
    };
    Ok(Plan {
        source: &request.source,
        output_dir: &request.output_dir,
        ico_root,
        // An empty path means no markup file, like an empty root_dir
        html_output: request
            .html_output
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty()),
    })
}

/// Run the pipeline with the [`StandardBackend`].
pub fn generate_favicons(request: &GenerationRequest) -> Result<(), PipelineError> {
    generate_with_backend(&StandardBackend::new(), request)
}

/// Run the pipeline with a specific backend (allows testing with mock).
pub fn generate_with_backend(
    backend: &impl FaviconBackend,
    request: &GenerationRequest,
) -> Result<(), PipelineError> {
    let plan = validate(request)?;
    let hooks = &request.hooks;
    hooks.start()?;

    let skip_files = request.skip_if_exists && plan.output_dir.exists();
    if skip_files {
        debug!(output_dir = %plan.output_dir.display(), "output directory exists; skipping files");
        hooks.skip_files(plan.output_dir)?;
    } else {
        write_files(backend, request, &plan)?;
        if let Some(root) = plan.ico_root {
            copy_ico(request, plan.output_dir, root)?;
        }
    }

    let markup = backend
        .generate_html(&request.settings)
        .map_err(PipelineError::Markup)?
        .into_iter()
        .map(|fragment| fragment.into_string())
        .collect::<Vec<_>>()
        .join("\n");

    if let Some(html_path) = plan.html_output {
        if let Some(parent) = html_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).at(parent)?;
        }
        fs::write(html_path, &markup).at(html_path)?;
        debug!(path = %html_path.display(), "markup written");
        hooks.html_written(html_path)?;
    }

    Ok(())
}

/// Steps 4–7: create the directory, normalize, generate, write in parallel.
fn write_files(
    backend: &impl FaviconBackend,
    request: &GenerationRequest,
    plan: &Plan<'_>,
) -> Result<(), PipelineError> {
    fs::create_dir_all(plan.output_dir).at(plan.output_dir)?;

    let icon = backend
        .normalize(plan.source)
        .map_err(|source| PipelineError::Normalize {
            path: plan.source.to_path_buf(),
            source,
        })?;
    let files = backend
        .generate_files(&icon, &request.settings)
        .map_err(PipelineError::Generate)?;
    debug!(count = files.len(), "favicon files generated");

    files
        .par_iter()
        .try_for_each(|(name, content)| write_one(request, plan.output_dir, name, content))?;

    info!(
        output_dir = %plan.output_dir.display(),
        count = files.len(),
        "favicon files written"
    );
    Ok(())
}

fn write_one(
    request: &GenerationRequest,
    output_dir: &Path,
    name: &str,
    content: &FileContent,
) -> Result<(), PipelineError> {
    let target = output_dir.join(checked_name(name)?);
    if let Some(parent) = target.parent().filter(|p| *p != output_dir) {
        fs::create_dir_all(parent).at(parent)?;
    }
    fs::write(&target, content.as_bytes()).at(&target)?;
    request.hooks.file_written(&target)?;
    Ok(())
}

/// Accept only names that stay inside the output directory.
fn checked_name(name: &str) -> Result<&Path, PipelineError> {
    let path = Path::new(name);
    let inside = !name.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if inside {
        Ok(path)
    } else {
        Err(PipelineError::InvalidFileName(name.to_string()))
    }
}

fn copy_ico(request: &GenerationRequest, output_dir: &Path, root: &Path) -> Result<(), PipelineError> {
    let from = output_dir.join(ROOT_ICO);
    let to = root.join(ROOT_ICO);
    fs::create_dir_all(root).at(root)?;
    fs::copy(&from, &to).at(&from)?;
    debug!(from = %from.display(), to = %to.display(), "favicon.ico copied");
    request.hooks.ico_copied(&to)?;
    Ok(())
}
