use argh::FromArgs;
use bytesize::ByteSize;
use dst_texture_api::{LoadOptions, TextureAsset};
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Print the format, flags and mip levels of a texture
#[argh(subcommand, name = "info")]
pub struct InfoCmd {
    /// input file (DST container or any supported image)
    #[argh(option)]
    pub input: PathBuf,
}

pub fn handle_info_command(cmd: InfoCmd) -> Result<(), Box<dyn std::error::Error>> {
    let asset = TextureAsset::load(&cmd.input, &LoadOptions::default())?;
    let flags = asset.flags();

    println!("File:       {}", cmd.input.display());
    println!("Format:     {}", asset.format());
    println!(
        "Flags:      {:#010x} (block compressed: {}, srgb: {})",
        flags.bits(),
        flags.block_compressed(),
        flags.srgb()
    );
    println!("Mip levels: {}", asset.mip_levels());

    let mut total_bytes = 0u64;
    for (index, mip) in asset.mips().iter().enumerate() {
        total_bytes += mip.data_size() as u64;
        println!(
            "  [{index:>2}] {:>5} x {:<5} {}",
            mip.width(),
            mip.height(),
            ByteSize(mip.data_size() as u64)
        );
    }
    println!("Pixel data: {}", ByteSize(total_bytes));
    Ok(())
}
