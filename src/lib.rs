//! # Faviconize
//!
//! Build-time favicon generation. Point it at one source image and it writes
//! a complete favicon set (ICO, PNG, SVG, Apple touch icon, web app manifest)
//! into an output directory, plus an HTML fragment with the matching
//! `<link>`/`<meta>` tags for your page head.
//!
//! # Architecture: One Pipeline, Two Entry Points
//!
//! ```text
//!  adapter::generate(request, cwd)         FaviconPlugin::build_start(root)
//!                 │                                     │
//!                 └────────── resolve paths ────────────┘
//!                                  │
//!                     pipeline::generate_with_backend
//!                                  │
//!         validate → on_start → files phase? → markup → html_output
//!                                  │
//!                      FaviconBackend (normalize, files, html)
//! ```
//!
//! The pipeline owns ordering, idempotency and the filesystem. Everything
//! image-shaped sits behind the [`FaviconBackend`] trait, so orchestration
//! tests run against a mock without decoding a single pixel.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Validation, skip logic, parallel writes, root ICO copy, markup output |
//! | [`request`] | [`GenerationRequest`] and lexical path resolution |
//! | [`hooks`] | Optional lifecycle callbacks fired by the pipeline |
//! | [`icon`] | The backend trait and the standard image implementation |
//! | [`settings`] | The opaque settings payload and its typed view |
//! | [`config`] | Loading requests from TOML files |
//! | [`adapter`] | Direct and build-plugin entry points |
//!
//! # Design Decisions
//!
//! ## Directory Existence Is the Cache Key
//!
//! With `skip_if_exists` on (the default), an existing output directory means
//! the icons are done. No hashing, no timestamps. Changing the source image
//! or settings does not regenerate anything; delete the directory instead.
//! The HTML fragment is cheap and is rewritten on every run regardless.
//!
//! ## Settings Stay Opaque
//!
//! The pipeline forwards the settings payload to the backend untouched. Only
//! the standard backend reads it, through [`settings::FaviconSettings`], so a
//! custom backend is free to define its own keys.
//!
//! ## Pure-Rust Imaging
//!
//! Raster decoding and PNG/ICO encoding use the `image` crate; SVG sources are
//! rendered with `resvg`. No ImageMagick, no headless browser, no network.

pub mod adapter;
pub mod config;
pub mod hooks;
pub mod icon;
pub mod pipeline;
pub mod request;
pub mod settings;

pub use adapter::{FaviconPlugin, generate};
pub use hooks::{HookError, HookSet};
pub use icon::{FaviconBackend, StandardBackend};
pub use pipeline::{PipelineError, generate_favicons, generate_with_backend};
pub use request::GenerationRequest;
pub use settings::Settings;

#[cfg(test)]
pub(crate) mod test_helpers;
