//! Placing the master icon on output canvases.
//!
//! Pure pixel work on the master bitmap: resample with Lanczos3, fill an
//! optional rounded background, center the icon. Also hosts the PNG and ICO
//! encoders every bitmap output goes through.

use super::backend::BackendError;
use crate::settings::IconTransformation;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Side of the icon inside a `size` canvas for a given scale, never below 1px.
pub(crate) fn inner_side(size: u32, scale: f32) -> u32 {
    ((size as f32 * scale).round() as u32).clamp(1, size)
}

/// Whether pixel `(x, y)` lies inside a `size`-square with rounded corners
/// of radius `radius` (in pixels). Samples the pixel center.
pub(crate) fn inside_rounded_square(x: u32, y: u32, size: u32, radius: f32) -> bool {
    if radius <= 0.0 {
        return true;
    }
    let side = size as f32;
    let px = x as f32 + 0.5;
    let py = y as f32 + 0.5;
    // Distance from the nearest corner-circle center, per axis
    let dx = (radius - px).max(px - (side - radius)).max(0.0);
    let dy = (radius - py).max(py - (side - radius)).max(0.0);
    dx * dx + dy * dy <= radius * radius
}

/// Render the master bitmap onto a `size`×`size` canvas.
pub fn render(
    master: &RgbaImage,
    size: u32,
    transformation: &IconTransformation,
) -> Result<RgbaImage, BackendError> {
    let mut canvas = match transformation.background()? {
        Some(color) => {
            let radius = transformation.radius() * size as f32 / 2.0;
            RgbaImage::from_fn(size, size, |x, y| {
                if inside_rounded_square(x, y, size, radius) {
                    color
                } else {
                    Rgba([0, 0, 0, 0])
                }
            })
        }
        None => RgbaImage::new(size, size),
    };

    let inner = inner_side(size, transformation.scale());
    let icon = if master.width() == inner && master.height() == inner {
        master.clone()
    } else {
        imageops::resize(master, inner, inner, FilterType::Lanczos3)
    };
    let offset = i64::from((size - inner) / 2);
    imageops::overlay(&mut canvas, &icon, offset, offset);
    Ok(canvas)
}

/// Encode an RGBA bitmap as PNG.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, BackendError> {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| BackendError::Encode(format!("Failed to encode PNG: {e}")))?;
    Ok(buffer)
}

/// Encode several square bitmaps into one multi-resolution ICO.
pub fn encode_ico(frames: &[RgbaImage]) -> Result<Vec<u8>, BackendError> {
    use image::codecs::ico::{IcoEncoder, IcoFrame};

    let frames = frames
        .iter()
        .map(|img| {
            IcoFrame::as_png(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| BackendError::Encode(format!("Failed to encode ICO frame: {e}")))?;

    let mut buffer = Vec::new();
    IcoEncoder::new(&mut buffer)
        .encode_images(&frames)
        .map_err(|e| BackendError::Encode(format!("Failed to encode ICO: {e}")))?;
    Ok(buffer)
}
