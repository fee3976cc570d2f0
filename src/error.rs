// Every variant states *where* things went wrong.
// The drawing core itself never fails; only the shell around it does.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed.
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Pushing the frame to the window failed.
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// Opening or decoding the image to annotate failed.
    #[error("image load error for {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The mask list file could not be parsed.
    #[error("mask list error for {}: {source}", .path.display())]
    MaskLoad {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The viewer configuration file could not be parsed.
    #[error("config error for {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A configuration value that parses but cannot be used.
    #[error("invalid config value for `{field}`: {message}")]
    InvalidConfig { field: &'static str, message: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
