//! PNG rendering of payload strings.

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;
use thiserror::Error;

/// Error-correction level for the rendered symbol.
///
/// Higher levels tolerate more damage but shrink the payload capacity;
/// very long payloads can fail to fit at `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Minimum edge length of the produced image, in pixels.
    pub size: u32,
    pub level: ErrorCorrection,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 256,
            level: ErrorCorrection::Medium,
        }
    }
}

/// Rendering failure: the payload does not fit the symbol, or PNG encoding
/// itself failed.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("payload does not fit a qr symbol at this error-correction level: {0}")]
    Capacity(#[from] QrError),

    #[error("png encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Render `content` as a PNG QR image.
pub fn render_png(content: &str, options: RenderOptions) -> Result<Vec<u8>, RenderError> {
    let code = QrCode::with_error_correction_level(content.as_bytes(), options.level.into())?;
    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(options.size, options.size)
        .build();

    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(img).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
