use crate::error::CliError;
use argh::FromArgs;
use dst_texture_api::{LoadOptions, PixelFormat, TextureAsset};
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Write one mip level of a texture out as a regular image
#[argh(subcommand, name = "unpack")]
pub struct UnpackCmd {
    /// input DST file
    #[argh(option)]
    pub input: PathBuf,

    /// output image path; the extension selects the image format
    #[argh(option)]
    pub output: PathBuf,

    /// mip level to export [default: 0]
    #[argh(option, default = "0")]
    pub level: usize,
}

pub fn handle_unpack_command(cmd: UnpackCmd) -> Result<(), Box<dyn std::error::Error>> {
    let mut asset = TextureAsset::load(&cmd.input, &LoadOptions::default())?;
    if cmd.level >= asset.mip_levels() {
        return Err(CliError::NoSuchLevel {
            level: cmd.level,
            count: asset.mip_levels(),
        }
        .into());
    }

    asset.decompress()?;
    let image = to_image(&asset, cmd.level)?;
    image.save(&cmd.output).map_err(CliError::from)?;

    println!(
        "Unpacked level {} ({}x{} {}) of {} -> {}",
        cmd.level,
        image.width(),
        image.height(),
        asset.format(),
        cmd.input.display(),
        cmd.output.display()
    );
    Ok(())
}

fn to_image(asset: &TextureAsset, level: usize) -> Result<DynamicImage, CliError> {
    let mip = asset.mip(level)?;
    let (width, height) = (mip.width(), mip.height());
    let pixels = mip.pixels().to_vec();
    let format = asset.format();

    let image = match format {
        PixelFormat::R8 => GrayImage::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8),
        PixelFormat::RG8 => {
            GrayAlphaImage::from_raw(width, height, pixels).map(DynamicImage::ImageLumaA8)
        }
        PixelFormat::RGB8 => RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8),
        PixelFormat::RGBA8 => {
            RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8)
        }
        _ => None,
    };
    image.ok_or(CliError::UnexportableFormat { format })
}
