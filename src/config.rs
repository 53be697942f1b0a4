//! Request configuration files.
//!
//! A generation request can live in a TOML file next to the project it
//! builds icons for. Orchestration options are top-level keys; everything
//! else is the settings payload handed to the collaborators.
//!
//! ## Configuration Options
//!
//! ```toml
//! source = "assets/logo.svg"        # Required
//! output_dir = "public/favicons"    # Required
//! html_output = "partials/favicons.html"
//! skip_if_exists = true             # Default true
//! copy_ico_to_root = false          # Default false, requires root_dir
//! root_dir = "public"
//!
//! path = "/favicons/"               # Settings payload from here on
//!
//! [icon.touch]
//! app_title = "My Site"
//! ```
//!
//! Paths are stored as written; the adapters resolve them against an
//! explicit base directory.

use crate::request::GenerationRequest;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Parse a request from TOML text.
pub fn parse_request(content: &str) -> Result<GenerationRequest, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load a request from a TOML file.
///
/// Missing required keys are not an error here; the pipeline reports them
/// when the request runs.
pub fn load_request(path: &Path) -> Result<GenerationRequest, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_request(&content)
}

/// Returns a fully-commented stock request file with every key explained.
pub fn stock_config_toml() -> &'static str {
    r##"# Favicon generation request
# ==========================
# Paths are relative to the directory the request is run from (the working
# directory for direct invocation, the project root for the build plugin).

# Source image: SVG, PNG, JPEG, WebP, TIFF or GIF. Square works best;
# other shapes are centered on a transparent square.
source = "assets/logo.svg"

# Directory the favicon files are written into.
output_dir = "public/favicons"

# File the <link>/<meta> markup is written to. Rewritten on every run.
html_output = "partials/favicons.html"

# Skip writing icons when output_dir already exists. Only the directory's
# existence is checked; delete it to force regeneration.
skip_if_exists = true

# Copy favicon.ico into root_dir (browsers request /favicon.ico).
copy_ico_to_root = false
# root_dir = "public"

# ---------------------------------------------------------------------------
# Settings below are passed to the icon generator as-is.
# ---------------------------------------------------------------------------

# URL prefix of the generated files in the markup and web manifest.
path = "/favicons/"

# Browser tab icons: favicon.ico, favicon-96x96.png, favicon.svg
[icon.desktop.transformation]
kind = "none"                 # "none" or "background"
background_color = "#ffffff"  # #rgb or #rrggbb
background_radius = 0.0       # 0 = square, 1 = circle
image_scale = 1.0             # fraction of the canvas the icon covers

# Apple touch icon (180x180)
[icon.touch]
# app_title = "My Site"       # apple-mobile-web-app-title

[icon.touch.transformation]
kind = "background"
background_color = "#ffffff"
background_radius = 0.0
image_scale = 0.7

# Web app manifest and its 192/512 icons
[icon.web_app_manifest]
name = "My Site"
short_name = "Site"
background_color = "#ffffff"
theme_color = "#ffffff"

[icon.web_app_manifest.transformation]
kind = "background"
background_color = "#ffffff"
background_radius = 0.0
image_scale = 0.7
"##
}
