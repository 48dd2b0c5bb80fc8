//! Image inspection for generated artifacts.

use image::GenericImageView;

use service_hub_core::{types::ImageFormat, Error, Result};

/// Information about an image.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    pub format: ImageFormat,
    /// Size in bytes.
    pub size_bytes: usize,
}

/// Validate image bytes and detect their format.
pub fn inspect_image(image_data: &[u8]) -> Result<ImageInfo> {
    let detected = image::guess_format(image_data)
        .map_err(|e| Error::parsing(format!("Unrecognized image data: {}", e)))?;

    let img = image::load_from_memory_with_format(image_data, detected)
        .map_err(|e| Error::parsing(format!("Invalid image: {}", e)))?;

    let (width, height) = img.dimensions();

    Ok(ImageInfo {
        width,
        height,
        format: to_image_format(detected),
        size_bytes: image_data.len(),
    })
}

fn to_image_format(format: image::ImageFormat) -> ImageFormat {
    match format {
        image::ImageFormat::Png => ImageFormat::Png,
        image::ImageFormat::Jpeg => ImageFormat::Jpeg,
        image::ImageFormat::Gif => ImageFormat::Gif,
        image::ImageFormat::WebP => ImageFormat::Webp,
        _ => ImageFormat::Unknown,
    }
}

#[cfg(test)]
pub(crate) fn tiny_png() -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image::RgbImage::new(3, 2))
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}
