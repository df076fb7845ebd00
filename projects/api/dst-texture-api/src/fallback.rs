//! Generic image decoding for inputs without the DST magic.

use crate::{error::TextureResult, mip_level::MipLevel};
use dst_texture_common::pixel_format::PixelFormat;
use image::DynamicImage;
use log::{debug, warn};

/// Decodes `data` with the `image` crate into a single level.
///
/// 1, 2, 3 and 4 channel images map onto R8, RG8, RGB8 and RGBA8. Images with more than
/// 8 bits per channel are reduced to 8 bits. With `flip_vertically` the rows are reversed.
pub(crate) fn decode_image(
    data: &[u8],
    flip_vertically: bool,
) -> TextureResult<(PixelFormat, MipLevel)> {
    warn!(
        "Input has no DST magic, decoding {} bytes as a generic image",
        data.len()
    );

    let mut image = image::load_from_memory(data)?;
    if flip_vertically {
        image = image.flipv();
    }

    let (width, height) = (image.width(), image.height());
    let (format, pixels) = into_pixels(image);
    debug!("Decoded {width}x{height} image as {format}");

    let level = MipLevel::new(width, height, format, pixels)?;
    Ok((format, level))
}

fn into_pixels(image: DynamicImage) -> (PixelFormat, Vec<u8>) {
    let format = PixelFormat::from_channel_count(image.color().channel_count() as u32)
        .unwrap_or(PixelFormat::RGBA8);
    let pixels = match format {
        PixelFormat::R8 => image.into_luma8().into_raw(),
        PixelFormat::RG8 => image.into_luma_alpha8().into_raw(),
        PixelFormat::RGB8 => image.into_rgb8().into_raw(),
        _ => image.into_rgba8().into_raw(),
    };
    (format, pixels)
}
