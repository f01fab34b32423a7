//! QR code emission.
//!
//! Encodes the site URL as a black-on-white PNG the visitor can scan.
//! The encoder output is rendered into a pixel buffer directly — module
//! pixels only, no timestamps or ancillary metadata — so repeated builds of
//! the same URL produce byte-identical files.

use image::{GrayImage, Luma};
use qrcode::{Color, QrCode};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("failed to write QR image: {0}")]
    Image(#[from] image::ImageError),
}

/// Minimum edge length in pixels. The rendered image is the smallest whole
/// multiple of the module grid that reaches this size.
const TARGET_SIZE: u32 = 200;

/// Quiet-zone width in modules on each side.
const MARGIN: u32 = 2;

/// Encode `data` and write it as a PNG at `path`.
pub fn write_qr_png(data: &str, path: &Path) -> Result<(), QrError> {
    let code = QrCode::new(data.as_bytes())?;
    render(&code).save(path)?;
    Ok(())
}

fn render(code: &QrCode) -> GrayImage {
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let grid = modules + 2 * MARGIN;
    let scale = TARGET_SIZE.div_ceil(grid).max(1);
    let size = grid * scale;
    GrayImage::from_fn(size, size, |x, y| {
        let column = x / scale;
        let row = y / scale;
        let in_code = (MARGIN..MARGIN + modules).contains(&column)
            && (MARGIN..MARGIN + modules).contains(&row);
        let dark = in_code
            && colors[((row - MARGIN) * modules + (column - MARGIN)) as usize] == Color::Dark;
        Luma([if dark { 0 } else { 255 }])
    })
}
