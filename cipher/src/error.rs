use crypto_hash::HashError;
use std::{error::Error, fmt::Display, path::PathBuf};
use utils::NumError;

#[derive(Debug)]
pub enum CipherError {
    /// 不合法的密钥标识
    InvalidKeyId(String),

    /// RSA素数的位长度至少为3
    InvalidBitsLen(usize),

    /// 密钥文本格式错误
    MalformedKey(String),

    /// 期望读取`expected`类型的密钥, 实际为`found`
    KeyKindMismatch { expected: &'static str, found: String },

    /// 签名不是合法的十六进制文本
    MalformedSignature(String),

    /// 读写文件`path`失败
    Io { path: PathBuf, err: std::io::Error },

    Num(NumError),

    Hash(HashError),
}

impl Display for CipherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKeyId(id) => f.write_fmt(format_args!("invalid key id `{id:?}`")),
            Self::InvalidBitsLen(bits) => f.write_fmt(format_args!(
                "rsa: invalid prime bits length `{bits}`, at least 3 bits required"
            )),
            Self::MalformedKey(s) => f.write_fmt(format_args!("rsa: malformed key, {s}")),
            Self::KeyKindMismatch { expected, found } => f.write_fmt(format_args!(
                "rsa: expect `{expected}` key, but found `{found}`"
            )),
            Self::MalformedSignature(s) => {
                f.write_fmt(format_args!("rsa: malformed signature `{s}`"))
            }
            Self::Io { path, err } => {
                f.write_fmt(format_args!("access `{}` failed, {err}", path.display()))
            }
            Self::Num(e) => Display::fmt(e, f),
            Self::Hash(e) => Display::fmt(e, f),
        }
    }
}

impl Error for CipherError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { err, .. } => Some(err),
            Self::Num(e) => Some(e),
            Self::Hash(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NumError> for CipherError {
    fn from(value: NumError) -> Self {
        Self::Num(value)
    }
}

impl From<HashError> for CipherError {
    fn from(value: HashError) -> Self {
        Self::Hash(value)
    }
}
