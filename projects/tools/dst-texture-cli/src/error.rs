use dst_texture_api::{PixelFormat, TextureError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("Level {level} does not exist, the texture has {count} levels")]
    NoSuchLevel { level: usize, count: usize },
    /// A level's buffer does not fit the image type built for its format.
    #[error("Cannot export {format} pixel data as an image")]
    UnexportableFormat { format: PixelFormat },
}
