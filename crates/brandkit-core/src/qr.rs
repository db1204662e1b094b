use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use image::{DynamicImage, ImageOutputFormat, Luma};
use qrcode::QrCode;

use crate::error::BrandkitError;

/// Pixel size of one QR module.
pub const MODULE_PIXELS: u32 = 10;

/// Render `text` as a QR code PNG (quiet zone included).
pub fn encode_png(text: &str) -> Result<Vec<u8>, BrandkitError> {
    if text.trim().is_empty() {
        return Err(BrandkitError::Validation(
            "Cannot encode an empty QR code".to_string(),
        ));
    }

    let code = QrCode::new(text.as_bytes())
        .map_err(|e| BrandkitError::Validation(format!("Cannot encode QR code: {e}")))?;

    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
        .map_err(|e| BrandkitError::Internal(format!("Failed to write QR PNG: {e}")))?;

    Ok(png)
}

/// Render `text` as a QR code PNG and base64-encode it for embedding in a
/// `data:image/png;base64,` URL.
pub fn encode_png_base64(text: &str) -> Result<String, BrandkitError> {
    encode_png(text).map(|png| BASE64_STANDARD.encode(png))
}
