use cell_raster::{Channels, Image};
use image::ColorType;
use std::path::Path;

use crate::error::DecodeError;

/// Decode an encoded JPEG or PNG into a pixel buffer.
///
/// Luma sources keep a single channel; everything else is converted to
/// 8-bit RGB with alpha dropped.
pub fn decode(bytes: &[u8]) -> Result<Image, DecodeError> {
    let decoded = image::load_from_memory(bytes)?;

    let image = match decoded.color() {
        ColorType::L8 | ColorType::L16 | ColorType::La8 | ColorType::La16 => {
            let buffer = decoded.into_luma8();
            let (width, height) = buffer.dimensions();
            Image::new(width, height, Channels::Gray, buffer.into_raw())?
        }
        _ => {
            let buffer = decoded.into_rgb8();
            let (width, height) = buffer.dimensions();
            Image::new(width, height, Channels::Rgb, buffer.into_raw())?
        }
    };

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        channels = image.channels().count(),
        "Decoded image"
    );

    Ok(image)
}

/// Read and decode an image file
pub fn load_file(path: &Path) -> Result<Image, DecodeError> {
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes)
}
