//! Source image normalization.
//!
//! | Source | Decoder | SVG rendition | Master bitmap |
//! |---|---|---|---|
//! | SVG | `usvg` parse | source text, verbatim | `resvg` render, fitted and centered |
//! | PNG, JPEG, WebP, TIFF, GIF | `image` crate | wrapper embedding a base64 PNG | padded to a centered square |
//!
//! The master bitmap is capped at [`MASTER_SIDE`], the largest output size.

use super::backend::{BackendError, MasterIcon};
use super::render::encode_png;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::imageops::{self, FilterType};
use image::{ImageReader, Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::io::Cursor;
use std::path::Path;

/// Side of the master bitmap; the largest fixed-size output is 512px.
pub const MASTER_SIDE: u32 = 512;

fn is_svg(path: &Path, data: &[u8]) -> bool {
    let by_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if by_extension {
        return true;
    }
    // Sniff the first KiB for an <svg root, past any XML prolog or comments
    let head = &data[..data.len().min(1024)];
    String::from_utf8_lossy(head).contains("<svg")
}

/// Load `path` and normalize it into a [`MasterIcon`].
pub fn normalize(path: &Path) -> Result<MasterIcon, BackendError> {
    let data = std::fs::read(path).map_err(BackendError::Io)?;
    if is_svg(path, &data) {
        normalize_svg(path, &data)
    } else {
        normalize_raster(path, &data)
    }
}

fn normalize_svg(path: &Path, data: &[u8]) -> Result<MasterIcon, BackendError> {
    let text = std::str::from_utf8(data).map_err(|e| {
        BackendError::Decode(format!("{} is not UTF-8 SVG: {e}", path.display()))
    })?;
    let tree = usvg::Tree::from_data(data, &usvg::Options::default())
        .map_err(|e| BackendError::Decode(format!("Failed to parse {}: {e}", path.display())))?;

    Ok(MasterIcon {
        svg: text.to_string(),
        bitmap: rasterize(&tree, MASTER_SIDE)?,
    })
}

/// Render an SVG tree fitted into a transparent `side`×`side` canvas.
fn rasterize(tree: &usvg::Tree, side: u32) -> Result<RgbaImage, BackendError> {
    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if w <= 0.0 || h <= 0.0 {
        return Err(BackendError::Decode("SVG has an empty viewport".into()));
    }
    let scale = side as f32 / w.max(h);
    let tx = (side as f32 - w * scale) / 2.0;
    let ty = (side as f32 - h * scale) / 2.0;

    let mut pixmap = tiny_skia::Pixmap::new(side, side)
        .ok_or_else(|| BackendError::Decode(format!("Cannot allocate {side}x{side} canvas")))?;
    let transform = tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, tx, ty);
    resvg::render(tree, transform, &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; image expects straight alpha
    let mut bitmap = RgbaImage::new(side, side);
    for (dst, src) in bitmap.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(bitmap)
}

fn normalize_raster(path: &Path, data: &[u8]) -> Result<MasterIcon, BackendError> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| BackendError::Decode(format!("Failed to decode {}: {e}", path.display())))?
        .to_rgba8();

    let bitmap = square_master(&img);
    let png = encode_png(&bitmap)?;
    Ok(MasterIcon {
        svg: embed_png_svg(&png, bitmap.width()),
        bitmap,
    })
}

/// Pad to a centered transparent square, then cap at [`MASTER_SIDE`].
fn square_master(img: &RgbaImage) -> RgbaImage {
    let (w, h) = img.dimensions();
    let side = w.max(h);
    let squared = if w == h {
        img.clone()
    } else {
        let mut canvas = RgbaImage::new(side, side);
        imageops::overlay(
            &mut canvas,
            img,
            i64::from((side - w) / 2),
            i64::from((side - h) / 2),
        );
        canvas
    };
    if side > MASTER_SIDE {
        imageops::resize(&squared, MASTER_SIDE, MASTER_SIDE, FilterType::Lanczos3)
    } else {
        squared
    }
}

/// SVG document that displays a PNG at `side`×`side`.
pub(crate) fn embed_png_svg(png: &[u8], side: u32) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" "#,
            r#"width="{side}" height="{side}" viewBox="0 0 {side} {side}">"#,
            r#"<image width="{side}" height="{side}" xlink:href="data:image/png;base64,{data}"/>"#,
            "</svg>"
        ),
        side = side,
        data = STANDARD.encode(png)
    )
}
