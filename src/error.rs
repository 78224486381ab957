use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported pixel layout: {0}")]
    Layout(#[from] cell_raster::ImageError),
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Color support not detected: terminal reports {0} colors, 256 required")]
    ColorUnsupported(u16),

    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}
