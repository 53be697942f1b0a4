//! Standard favicon backend.
//!
//! | Operation | Implementation |
//! |---|---|
//! | Normalize | [`normalize`](super::normalize::normalize): `image` decoders, `usvg`/`resvg` for SVG |
//! | Files | [`generate_files`](super::files::generate_files): Lanczos3 resampling, PNG/ICO via `image` |
//! | HTML | [`generate_html`](super::markup::generate_html): `maud` fragments |
//!
//! Settings are read through [`FaviconSettings`] on every call; the payload
//! itself stays opaque to the pipeline.

use super::backend::{BackendError, FaviconBackend, FileSet, MasterIcon};
use super::{files, markup, normalize};
use crate::settings::{FaviconSettings, Settings};
use maud::Markup;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct StandardBackend;

impl StandardBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StandardBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FaviconBackend for StandardBackend {
    fn normalize(&self, source: &Path) -> Result<MasterIcon, BackendError> {
        normalize::normalize(source)
    }

    fn generate_files(
        &self,
        icon: &MasterIcon,
        settings: &Settings,
    ) -> Result<FileSet, BackendError> {
        let settings = FaviconSettings::from_settings(settings)?;
        files::generate_files(icon, &settings)
    }

    fn generate_html(&self, settings: &Settings) -> Result<Vec<Markup>, BackendError> {
        let settings = FaviconSettings::from_settings(settings)?;
        Ok(markup::generate_html(&settings))
    }
}
