use argh::FromArgs;
use bytesize::ByteSize;
use dst_texture_api::{CompressionQuality, LoadOptions, PixelFormat, TextureAsset};
use log::debug;
use std::{path::PathBuf, time::Instant};

#[derive(FromArgs, Debug)]
/// Convert a texture or image into a DST container
#[argh(subcommand, name = "pack")]
pub struct PackCmd {
    /// input file (DST container or any supported image)
    #[argh(option)]
    pub input: PathBuf,

    /// output DST file path
    #[argh(option)]
    pub output: PathBuf,

    /// target pixel format (r8, rg8, rgb8, rgba8, bc1, bc3) [default: keep]
    #[argh(option)]
    pub format: Option<PixelFormat>,

    /// generate a full mip chain
    #[argh(switch)]
    pub mipmaps: bool,

    /// block encoder quality (fast, normal) [default: normal]
    #[argh(option, default = "CompressionQuality::Normal")]
    pub quality: CompressionQuality,

    /// mark the pixel data as sRGB
    #[argh(switch)]
    pub srgb: bool,

    /// flip images decoded from generic formats vertically
    #[argh(switch)]
    pub flip: bool,
}

pub fn handle_pack_command(cmd: PackCmd) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let options = LoadOptions {
        flip_vertically: cmd.flip,
    };
    let mut asset = TextureAsset::load(&cmd.input, &options)?;
    debug!("Loaded {} as {}", cmd.input.display(), asset.format());

    // Mips are generated before block compression so each level is filtered from
    // uncompressed pixels.
    match cmd.format {
        Some(target) if target.is_compressed() => {
            if cmd.mipmaps {
                asset.generate_mipmaps()?;
            }
            asset.compress(target, cmd.quality)?;
        }
        Some(target) => {
            asset.convert_format(target)?;
            if cmd.mipmaps {
                asset.generate_mipmaps()?;
            }
        }
        None => {
            if cmd.mipmaps {
                asset.generate_mipmaps()?;
            }
        }
    }

    if cmd.srgb {
        asset.set_srgb(true);
    }
    asset.save(&cmd.output)?;

    let total_bytes: u64 = asset.mips().iter().map(|mip| mip.data_size() as u64).sum();
    println!(
        "Packed {} -> {} ({}, {} mip levels, {} pixel data) in {:.2?}",
        cmd.input.display(),
        cmd.output.display(),
        asset.format(),
        asset.mip_levels(),
        ByteSize(total_bytes),
        start.elapsed()
    );
    Ok(())
}
