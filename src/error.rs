use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, writing or decoding drawings
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode drawing data: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode drawing data: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("unsupported drawing data version {0}")]
    UnsupportedVersion(u32),

    #[error("invalid drawing metadata: {0}")]
    Metadata(#[source] serde_json::Error),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
