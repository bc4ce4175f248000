// src/encoder.rs
use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageOutputFormat};
use log::debug;
use thiserror::Error;

/// JPEG quality used for every upload payload.
pub const JPEG_QUALITY: u8 = 100;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("image has no pixels")]
    EmptyImage,
    #[error("JPEG compression failed: {0}")]
    Jpeg(#[from] image::ImageError),
}

/// Base64 text of a JPEG-compressed image, ready to be placed in a request body.
///
/// Produced once per upload attempt and dropped when the attempt completes.
/// The base64 step is lossless; only the JPEG compression underneath is lossy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compress an image to JPEG at quality 100 and wrap the bytes in standard
/// base64 (padded, no line breaks).
///
/// Deterministic: the same image always yields the same payload string.
pub fn encode_image(image: &DynamicImage) -> Result<EncodedPayload, EncodeError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::EmptyImage);
    }

    // JPEG carries no alpha channel, so flatten to RGB first
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());

    let mut jpeg = Vec::new();
    let mut cursor = Cursor::new(&mut jpeg);
    rgb.write_to(&mut cursor, ImageOutputFormat::Jpeg(JPEG_QUALITY))?;

    debug!(
        "compressed {}x{} image into {} JPEG bytes",
        width,
        height,
        jpeg.len()
    );

    Ok(EncodedPayload(general_purpose::STANDARD.encode(&jpeg)))
}
