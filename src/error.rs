use cipher::CipherError;
use crypto_hash::HashError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MyError {
    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error("load config failed, {0}")]
    Config(#[from] config::ConfigError),

    #[error("access `{}` failed, {err}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    #[error("The message file `{}` is not valid UTF-8", .0.display())]
    NotUtf8(PathBuf),
}

impl MyError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }
}
