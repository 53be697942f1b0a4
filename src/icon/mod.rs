//! Favicon collaborators: pure Rust, no external tools.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode raster** | `image` (PNG, JPEG, WebP, TIFF, GIF) |
//! | **Decode SVG** | `usvg` parse + `resvg` render |
//! | **Resample** | `image::imageops::resize` with `Lanczos3` |
//! | **Encode** | `image` PNG encoder, `IcoEncoder` for multi-size ICO |
//! | **Markup** | `maud` |
//!
//! The module is split into:
//! - **Backend**: [`FaviconBackend`] trait + [`StandardBackend`]
//! - **Normalize**: source image → [`MasterIcon`]
//! - **Render**: canvas placement and encoders (unit testable pixel math)
//! - **Files**: the favicon file set and `site.webmanifest`
//! - **Markup**: `<link>`/`<meta>` fragments

pub mod backend;
pub mod files;
pub mod markup;
pub mod normalize;
mod render;
pub mod standard;

pub use backend::{BackendError, FaviconBackend, FileContent, FileSet, MasterIcon};
pub use standard::StandardBackend;
