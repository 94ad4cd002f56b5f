//! Image output.
//!
//! The tracer produces sRGB RGBA8 pixels, so saving is a plain PNG
//! encode with no further tone mapping.

use image::{ImageError, RgbaImage};
use log::info;

/// Save the rendered image as a PNG file.
///
/// Encoding and I/O errors are returned to the caller.
pub fn save_image_as_png(image: &RgbaImage, output_path: &str) -> Result<(), ImageError> {
    image.save(output_path)?;
    info!("Saved rendered image to {:?}", output_path);
    Ok(())
}
