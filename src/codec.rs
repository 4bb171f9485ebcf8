//! Decode/encode boundary between image files and [`Raster`] values.
//!
//! The transform and the animator never touch the filesystem; everything
//! format-related is front-loaded here. Output format is inferred from the
//! destination extension by the `image` crate.

use std::path::Path;

use crate::{
    error::{CharcoalError, CharcoalResult},
    raster::{Channels, Raster},
};

/// Decode encoded image bytes into a [`Raster`].
///
/// Already-grayscale images stay single-channel; everything else is
/// converted to RGB. Undecodable bytes are an [`CharcoalError::InvalidInput`].
pub fn decode_image(bytes: &[u8]) -> CharcoalResult<Raster> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CharcoalError::invalid_input(format!("decode image: {e}")))?;

    match dyn_img {
        image::DynamicImage::ImageLuma8(img) => {
            let (width, height) = img.dimensions();
            Raster::new(width, height, Channels::Gray, img.into_raw())
        }
        other => {
            let rgb = other.to_rgb8();
            let (width, height) = rgb.dimensions();
            Raster::new(width, height, Channels::Rgb, rgb.into_raw())
        }
    }
}

/// Read and decode the image at `path`.
pub fn read_image(path: &Path) -> CharcoalResult<Raster> {
    let bytes = std::fs::read(path)
        .map_err(|e| CharcoalError::io(format!("read '{}': {e}", path.display())))?;
    tracing::debug!(path = %path.display(), len = bytes.len(), "read source image");
    decode_image(&bytes)
}

/// Encode `raster` to `path`, format inferred from the extension.
pub fn write_image(path: &Path, raster: &Raster) -> CharcoalResult<()> {
    let color = match raster.channels() {
        Channels::Gray => image::ColorType::L8,
        Channels::Rgb => image::ColorType::Rgb8,
    };
    image::save_buffer(path, raster.data(), raster.width(), raster.height(), color)
        .map_err(|e| CharcoalError::io(format!("write '{}': {e}", path.display())))?;
    tracing::debug!(path = %path.display(), "wrote sketch");
    Ok(())
}
