//! Entry points that resolve paths and hand off to the pipeline.
//!
//! Both adapters differ only in the base directory relative paths are
//! resolved against, and both take it as an argument:
//!
//! - [`generate`]: direct invocation from a script or tool; pass the
//!   directory the caller considers current.
//! - [`FaviconPlugin`]: build-plugin style; pass the project root once the
//!   build starts. From a Cargo build script that is `CARGO_MANIFEST_DIR`:
//!
//! ```no_run
//! // build.rs
//! use faviconize::{FaviconPlugin, GenerationRequest};
//! use std::path::Path;
//!
//! let plugin = FaviconPlugin::new(
//!     GenerationRequest::new("assets/logo.svg", "public/favicons")
//!         .html_output("templates/favicons.html"),
//! );
//! let root = Path::new(env!("CARGO_MANIFEST_DIR"));
//! for line in plugin.rerun_directives(root) {
//!     println!("{line}");
//! }
//! plugin.build_start(root).expect("favicon generation failed");
//! ```
//!
//! Neither adapter validates, defaults, or alters the request beyond path
//! resolution.

use crate::icon::{FaviconBackend, StandardBackend};
use crate::pipeline::{PipelineError, generate_with_backend};
use crate::request::GenerationRequest;
use std::path::Path;
use tracing::debug;

/// Resolve `request` against `base_dir` and run the pipeline.
pub fn generate(request: GenerationRequest, base_dir: &Path) -> Result<(), PipelineError> {
    generate_using(&StandardBackend::new(), request, base_dir)
}

/// [`generate`] with a specific backend.
pub fn generate_using(
    backend: &impl FaviconBackend,
    request: GenerationRequest,
    base_dir: &Path,
) -> Result<(), PipelineError> {
    let request = request.resolved_against(base_dir);
    debug!(
        source = %request.source.display(),
        output_dir = %request.output_dir.display(),
        "resolved favicon request"
    );
    generate_with_backend(backend, &request)
}

/// Build-plugin adapter: holds a request and runs it when the build starts.
#[derive(Debug, Clone)]
pub struct FaviconPlugin<B = StandardBackend> {
    request: GenerationRequest,
    backend: B,
}

impl FaviconPlugin {
    pub fn new(request: GenerationRequest) -> Self {
        Self::with_backend(request, StandardBackend::new())
    }
}

impl<B: FaviconBackend> FaviconPlugin<B> {
    pub fn with_backend(request: GenerationRequest, backend: B) -> Self {
        Self { request, backend }
    }

    pub fn name(&self) -> &'static str {
        "faviconize"
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Run the pipeline once, resolving paths against `project_root`.
    pub fn build_start(&self, project_root: &Path) -> Result<(), PipelineError> {
        generate_using(&self.backend, self.request.clone(), project_root)
    }

    /// `cargo:rerun-if-changed` lines for the inputs of this request.
    ///
    /// The output directory is included so deleting it re-triggers the
    /// build script, which is the only way the files phase re-runs.
    pub fn rerun_directives(&self, project_root: &Path) -> Vec<String> {
        let request = self.request.clone().resolved_against(project_root);
        [&request.source, &request.output_dir]
            .into_iter()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| format!("cargo:rerun-if-changed={}", p.display()))
            .collect()
    }
}
