//! Favicon file set generation.
//!
//! ## Output Structure
//!
//! ```text
//! <output_dir>/
//! ├── favicon.ico                    # 16, 32, 48 px (desktop)
//! ├── favicon-96x96.png              # desktop
//! ├── favicon.svg                    # desktop, scalable
//! ├── apple-touch-icon.png           # 180 px (touch)
//! ├── web-app-manifest-192x192.png   # web app manifest
//! ├── web-app-manifest-512x512.png   # web app manifest
//! └── site.webmanifest               # JSON
//! ```

use super::backend::{BackendError, FileContent, FileSet, MasterIcon};
use super::render::{encode_ico, encode_png, inner_side, render};
use crate::settings::{FaviconSettings, IconTransformation, format_color, parse_color};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::sync::Arc;

pub const FAVICON_ICO: &str = "favicon.ico";
pub const FAVICON_PNG: &str = "favicon-96x96.png";
pub const FAVICON_SVG: &str = "favicon.svg";
pub const APPLE_TOUCH_ICON: &str = "apple-touch-icon.png";
pub const WEB_APP_MANIFEST: &str = "site.webmanifest";

const ICO_SIZES: [u32; 3] = [16, 32, 48];
const FAVICON_PNG_SIZE: u32 = 96;
const APPLE_TOUCH_SIZE: u32 = 180;
const MANIFEST_ICON_SIZES: [u32; 2] = [192, 512];

/// File name of a web app manifest icon at `size`.
pub fn manifest_icon_name(size: u32) -> String {
    format!("web-app-manifest-{size}x{size}.png")
}

/// Produce the full favicon file set.
pub fn generate_files(
    icon: &MasterIcon,
    settings: &FaviconSettings,
) -> Result<FileSet, BackendError> {
    let mut files = FileSet::new();
    let desktop = &settings.icon.desktop.transformation;

    let ico_frames = ICO_SIZES
        .iter()
        .map(|&size| render(&icon.bitmap, size, desktop))
        .collect::<Result<Vec<_>, _>>()?;
    files.insert(
        FAVICON_ICO.to_string(),
        FileContent::Blob(Arc::from(encode_ico(&ico_frames)?)),
    );

    files.insert(
        FAVICON_PNG.to_string(),
        png_file(icon, FAVICON_PNG_SIZE, desktop)?,
    );
    files.insert(
        FAVICON_SVG.to_string(),
        FileContent::Text(transformed_svg(icon, desktop)?),
    );
    files.insert(
        APPLE_TOUCH_ICON.to_string(),
        png_file(icon, APPLE_TOUCH_SIZE, &settings.icon.touch.transformation)?,
    );

    let manifest = &settings.icon.web_app_manifest;
    for size in MANIFEST_ICON_SIZES {
        files.insert(
            manifest_icon_name(size),
            png_file(icon, size, &manifest.transformation)?,
        );
    }
    files.insert(
        WEB_APP_MANIFEST.to_string(),
        FileContent::Text(web_app_manifest(settings)?),
    );

    Ok(files)
}

fn png_file(
    icon: &MasterIcon,
    size: u32,
    transformation: &IconTransformation,
) -> Result<FileContent, BackendError> {
    let img = render(&icon.bitmap, size, transformation)?;
    Ok(FileContent::Bytes(encode_png(&img)?))
}

/// Scalable icon with the transformation expressed in SVG.
///
/// The identity transformation returns the master SVG untouched; otherwise
/// the master is embedded as an `<image>` over an optional rounded `<rect>`.
fn transformed_svg(
    icon: &MasterIcon,
    transformation: &IconTransformation,
) -> Result<String, BackendError> {
    if transformation.is_identity() {
        return Ok(icon.svg.clone());
    }

    let side = icon.side().max(1);
    let inner = inner_side(side, transformation.scale());
    let offset = (side - inner) / 2;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{side}" height="{side}" viewBox="0 0 {side} {side}">"#
    );
    if let Some(color) = transformation.background()? {
        let rx = transformation.radius() * side as f32 / 2.0;
        svg.push_str(&format!(
            r#"<rect width="{side}" height="{side}" rx="{rx}" fill="{}"/>"#,
            format_color(color)
        ));
    }
    svg.push_str(&format!(
        r#"<image x="{offset}" y="{offset}" width="{inner}" height="{inner}" xlink:href="data:image/svg+xml;base64,{}"/>"#,
        STANDARD.encode(icon.svg.as_bytes())
    ));
    svg.push_str("</svg>");
    Ok(svg)
}

#[derive(Serialize)]
struct ManifestIcon {
    src: String,
    sizes: String,
    #[serde(rename = "type")]
    mime: &'static str,
    purpose: &'static str,
}

#[derive(Serialize)]
struct WebManifest<'a> {
    name: &'a str,
    short_name: &'a str,
    icons: Vec<ManifestIcon>,
    theme_color: String,
    background_color: String,
    display: &'static str,
}

fn web_app_manifest(settings: &FaviconSettings) -> Result<String, BackendError> {
    let manifest = &settings.icon.web_app_manifest;
    let doc = WebManifest {
        name: &manifest.name,
        short_name: &manifest.short_name,
        icons: MANIFEST_ICON_SIZES
            .iter()
            .map(|&size| ManifestIcon {
                src: settings.href(&manifest_icon_name(size)),
                sizes: format!("{size}x{size}"),
                mime: "image/png",
                purpose: "maskable",
            })
            .collect(),
        theme_color: format_color(parse_color(&manifest.theme_color)?),
        background_color: format_color(parse_color(&manifest.background_color)?),
        display: "standalone",
    };
    serde_json::to_string_pretty(&doc)
        .map_err(|e| BackendError::Encode(format!("Failed to serialize manifest: {e}")))
}
