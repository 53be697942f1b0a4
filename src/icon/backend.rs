//! Favicon backend trait and shared types.
//!
//! The [`FaviconBackend`] trait is the seam between the persistence pipeline
//! and everything that understands images: normalizing the source, producing
//! the file set, and producing the HTML markup. The pipeline treats all three
//! as black boxes.
//!
//! The production implementation is
//! [`StandardBackend`](super::standard::StandardBackend).

use crate::settings::{Settings, SettingsError};
use image::RgbaImage;
use maud::Markup;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not load source image: {0}")]
    Decode(String),
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Normalized form of the source image.
///
/// Every source, raster or vector, is reduced to the same pair: a scalable
/// SVG rendition (written out as `favicon.svg`) and a square RGBA master
/// bitmap that every fixed-size output is resampled from.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterIcon {
    pub svg: String,
    pub bitmap: RgbaImage,
}

impl MasterIcon {
    /// Side length of the square master bitmap.
    pub fn side(&self) -> u32 {
        self.bitmap.width()
    }
}

/// Content of one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Shared immutable binary data.
    Blob(Arc<[u8]>),
    /// UTF-8 text.
    Text(String),
    /// Owned byte buffer.
    Bytes(Vec<u8>),
}

impl FileContent {
    /// Canonical byte representation written to disk.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Blob(blob) => blob,
            FileContent::Text(text) => text.as_bytes(),
            FileContent::Bytes(bytes) => bytes,
        }
    }
}

/// Generated files keyed by name relative to the output directory.
pub type FileSet = BTreeMap<String, FileContent>;

/// Collaborators the persistence pipeline delegates to.
///
/// `Sync` because the pipeline shares the backend with its write workers.
pub trait FaviconBackend: Sync {
    /// Load the source image and normalize it into a [`MasterIcon`].
    fn normalize(&self, source: &std::path::Path) -> Result<MasterIcon, BackendError>;

    /// Produce every favicon file for `icon` under `settings`.
    fn generate_files(&self, icon: &MasterIcon, settings: &Settings)
    -> Result<FileSet, BackendError>;

    /// Produce the `<link>`/`<meta>` fragments referencing the generated files.
    fn generate_html(&self, settings: &Settings) -> Result<Vec<Markup>, BackendError>;
}
