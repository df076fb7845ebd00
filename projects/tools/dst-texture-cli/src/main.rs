#![cfg(not(tarpaulin_include))]

mod commands;
mod error;

use argh::FromArgs;
use core::error::Error;
use env_logger::{Builder, Target};

#[derive(FromArgs, Debug)]
/// Inspect, pack and unpack DST texture containers
struct TopLevel {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Info(commands::info::InfoCmd),
    Pack(commands::pack::PackCmd),
    Unpack(commands::unpack::UnpackCmd),
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut builder = Builder::from_default_env();
    builder.target(Target::Stdout);
    builder.init();

    let cli: TopLevel = argh::from_env();

    match cli.command {
        Commands::Info(cmd) => {
            commands::info::handle_info_command(cmd)?;
        }
        Commands::Pack(cmd) => {
            commands::pack::handle_pack_command(cmd)?;
        }
        Commands::Unpack(cmd) => {
            commands::unpack::handle_unpack_command(cmd)?;
        }
    }

    Ok(())
}
