//! PNG normalization and base64 transport encoding.
//!
//! Upload bytes become a transportable text representation in two steps:
//! bytes that already carry the PNG signature pass through untouched, any
//! other decodable raster is transcoded to PNG, then the payload is encoded
//! as standard base64. Both failure modes surface as
//! [`VestiaryError::Encoding`].

use crate::{Result, VestiaryError, types::EncodedImage};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use image::ImageFormat;
use std::io::Cursor;

/// Maximum allowed transportable payload size (10 MB), measured after PNG
/// normalization. Oversized payloads are rejected instead of shipped.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// MIME type of every transportable payload.
pub const PNG_MIME: &str = "image/png";

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Encode binary bytes as standard base64 with padding.
pub fn encode_base64(data: &[u8]) -> String {
    BASE64_STANDARD.encode(data)
}

/// Decode a standard base64 payload back to bytes.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(data)
        .map_err(|e| VestiaryError::Encoding(format!("invalid base64 payload: {e}")))
}

/// Whether the bytes start with the PNG signature.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// Normalize raw upload bytes to a PNG payload.
///
/// PNG input passes through byte-identical. Anything else must be a raster
/// the `image` crate can decode.
pub fn to_png(bytes: &[u8]) -> Result<Vec<u8>> {
    if is_png(bytes) {
        return Ok(bytes.to_vec());
    }
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| VestiaryError::Encoding(format!("undecodable image: {e}")))?;
    let mut out = Cursor::new(Vec::new());
    decoded
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| VestiaryError::Encoding(format!("PNG encoding failed: {e}")))?;
    Ok(out.into_inner())
}

/// Encode one upload into its transportable representation.
pub fn encode_image(bytes: &[u8]) -> Result<EncodedImage> {
    if bytes.is_empty() {
        return Err(VestiaryError::Encoding("empty image payload".to_string()));
    }
    let png = to_png(bytes)?;
    if png.len() > MAX_IMAGE_BYTES {
        return Err(VestiaryError::Encoding(format!(
            "payload of {} bytes exceeds the {MAX_IMAGE_BYTES} byte limit",
            png.len()
        )));
    }
    Ok(EncodedImage { mime_type: PNG_MIME.to_string(), data_base64: encode_base64(&png) })
}
