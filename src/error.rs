use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read image {path}")]
    UnreadableImage { path: String },

    #[error("source image {width}x{height} is smaller than the {size}x{size} crop")]
    SourceTooSmall { width: i32, height: i32, size: i32 },

    #[error("sprite image {path} has {channels} channels, expected 4 (BGRA)")]
    SpriteWithoutAlpha { path: String, channels: i32 },

    #[error("camera {index} unavailable")]
    CameraUnavailable { index: i32 },

    #[error("could not write image {path}")]
    WriteFailed { path: String },

    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
