use thiserror::Error;

pub type PxcResult<T> = Result<T, PxcError>;

#[derive(Debug, Error)]
pub enum PxcError {
    #[error(
        "encryption_root_secret option in proxy-server.conf must be a base64 encoding of at least 32 raw bytes"
    )]
    InvalidRootSecret,

    #[error("config error: {0}")]
    Config(String),

    #[error("crypto error: {0}")]
    Crypto(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
