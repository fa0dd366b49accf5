use thiserror::Error;

pub type Result<T> = std::result::Result<T, VolcastError>;

#[derive(Debug, Error)]
pub enum VolcastError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("path does not lead to a file: {0}")]
    NotAFile(String),

    #[error("volume data too short: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("cannot parse volume header")]
    Header,

    #[error("unsupported sample width: {0} bytes")]
    UnsupportedSampleWidth(u8),

    #[error("unknown transfer function `{0}`")]
    UnknownTransferFunction(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("render thread is not running")]
    RendererDisconnected,
}
